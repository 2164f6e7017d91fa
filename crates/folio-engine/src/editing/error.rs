use crate::content::ValidationError;

/// An editing operation that was rejected. The document is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Block index {index} is out of range for a document of {len} blocks")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("Selection {start}..{end} is not valid for a buffer of {len} bytes")]
    InvalidSelection { start: usize, end: usize, len: usize },
}
