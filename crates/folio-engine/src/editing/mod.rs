/*!
 * # Editing
 *
 * Content is edited through pure operations over an immutable [`Document`]:
 *
 * - **`apply_inline_style`** wraps a selection of the editor's text buffer in a
 *   style's markers. It touches only the buffer, never the document.
 * - **`append_block`** validates the buffer and returns a new document with one
 *   more block at the end.
 * - **`remove_block`** returns a new document without the block at an index.
 *
 * A rejected operation returns an [`EditError`] and the caller's document is
 * unchanged. [`EditSession`] layers the editor's buffers (text, target,
 * selection) over these operations for interactive front ends.
 *
 * ```rust
 * use folio_engine::content::{BlockKind, Document};
 * use folio_engine::editing::{append_block, apply_inline_style, remove_block};
 * use folio_engine::inline::InlineStyle;
 *
 * let buffer = apply_inline_style("hello world", 0..5, InlineStyle::Bold).unwrap();
 * let doc = append_block(&Document::default(), BlockKind::Paragraph, &buffer, None, None).unwrap();
 * assert_eq!(doc.len(), 1);
 *
 * let doc = remove_block(&doc, 0).unwrap();
 * assert!(doc.is_empty());
 * ```
 *
 * [`Document`]: crate::content::Document
 */

pub mod error;
pub mod operations;
pub mod session;

pub use error::EditError;
pub use operations::{append_block, apply_inline_style, build_block, remove_block, resolve_index};
pub use session::EditSession;
