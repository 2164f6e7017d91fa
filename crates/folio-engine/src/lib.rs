pub mod content;
pub mod editing;
pub mod inline;
pub mod io;
pub mod records;
pub mod render;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use content::{Block, BlockKind, ContentError, Document, HeadingLevel, ValidationError};
pub use editing::{EditError, EditSession, append_block, apply_inline_style, remove_block};
pub use inline::InlineStyle;
pub use io::*;
pub use records::{ContactMessage, ContactReply, ReplyStatus};
pub use render::{RenderOptions, render, render_with};
pub use store::{ContentId, ContentStore, FileStore, MemoryStore, OwnerId, StorageError};
