//! # Inline markup
//!
//! The editor wraps selected text in one of six markers (see [`InlineStyle`]).
//! This module recognizes exactly those markers when block text is displayed.
//! Anything else in the text is plain text.
//!
//! Code spans are raw zones: nothing inside backticks is interpreted, so
//! `` `**not bold**` `` is a single code span. Once a style's closing marker is
//! known to be missing from the rest of a range it is not searched for again,
//! so unclosed markers cost one scan per style rather than one per opener.
//!
//! - **`kinds`**: `InlineStyle` and the delimiters each style owns
//! - **`scanner`**: marker matching within one range of the source
//! - **`parser`**: `parse_inline()` entry point
//! - **`types`**: `InlineNode` tree and `Span`

pub mod kinds;
pub mod parser;
pub mod scanner;
pub mod types;

pub use kinds::InlineStyle;
pub use parser::parse_inline;
pub use types::{InlineNode, Span};
