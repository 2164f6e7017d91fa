use super::BlockKind;

/// Content that the editor refuses to build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A {kind} block needs some text")]
    EmptyText { kind: BlockKind },
    #[error("A heading block needs a level")]
    MissingHeadingLevel,
    #[error("Heading level {0} is out of range (expected 1 to 3)")]
    HeadingLevelOutOfRange(i64),
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),
    #[error("Unknown inline style: {0}")]
    UnknownStyle(String),
    #[error("A reply needs at least one block")]
    EmptyReply,
}

/// Persisted content that could not be decoded into a document.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON array of blocks, found {found}")]
    NotAnArray { found: &'static str },
}
