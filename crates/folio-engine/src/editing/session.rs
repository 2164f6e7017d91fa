use std::ops::Range;

use crate::content::{BlockKind, Document};
use crate::inline::InlineStyle;

use super::{EditError, append_block, apply_inline_style, remove_block};

/// Editor state for one document: the blocks so far plus the input buffers.
///
/// The text buffer holds what the author is typing for the next block; the
/// target buffer holds the URL for link and image blocks. Both are cleared
/// after a successful append and kept after a rejected one.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    document: Document,
    buffer: String,
    target: String,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn target_mut(&mut self) -> &mut String {
        &mut self.target
    }

    /// Wraps the selected part of the text buffer in `style`'s markers.
    pub fn style_selection(
        &mut self,
        selection: Range<usize>,
        style: InlineStyle,
    ) -> Result<(), EditError> {
        self.buffer = apply_inline_style(&self.buffer, selection, style)?;
        Ok(())
    }

    /// Appends a block built from the buffers and clears them.
    pub fn append(&mut self, kind: BlockKind, level: Option<u8>) -> Result<(), EditError> {
        let target = Some(self.target.as_str()).filter(|t| !t.trim().is_empty());
        match append_block(&self.document, kind, &self.buffer, level, target) {
            Ok(document) => {
                self.document = document;
                self.buffer.clear();
                self.target.clear();
                Ok(())
            }
            Err(err) => {
                log::debug!("Rejected {kind} block: {err}");
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<(), EditError> {
        self.document = remove_block(&self.document, index)?;
        Ok(())
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, HeadingLevel, ValidationError};
    use pretty_assertions::assert_eq;

    #[test]
    fn append_clears_buffers() {
        let mut session = EditSession::new();
        session.set_buffer("Intro");
        session.append(BlockKind::Heading, Some(1)).unwrap();

        assert_eq!(session.buffer(), "");
        assert_eq!(
            session.document().blocks(),
            &[Block::heading(HeadingLevel::H1, "Intro")]
        );
    }

    #[test]
    fn rejected_append_keeps_buffers() {
        let mut session = EditSession::new();
        session.set_buffer("Title");
        session.set_target("/unused");
        let err = session.append(BlockKind::Heading, None).unwrap_err();

        assert_eq!(
            err,
            EditError::Validation(ValidationError::MissingHeadingLevel)
        );
        assert_eq!(session.buffer(), "Title");
        assert_eq!(session.target(), "/unused");
        assert!(session.document().is_empty());

        session.append(BlockKind::Heading, Some(2)).unwrap();
        assert_eq!(session.target(), "");
        assert_eq!(
            session.document().blocks(),
            &[Block::heading(HeadingLevel::H2, "Title")]
        );
    }

    #[test]
    fn image_without_target_is_appended() {
        let mut session = EditSession::new();
        session.set_buffer("caption");
        session.append(BlockKind::Image, None).unwrap();

        assert_eq!(session.buffer(), "");
        assert_eq!(session.document().get(0).and_then(Block::target), None);

        session.set_target("/cat.png");
        session.append(BlockKind::Image, None).unwrap();
        assert_eq!(session.document().get(1).and_then(Block::target), Some("/cat.png"));
    }

    #[test]
    fn styling_edits_only_the_buffer() {
        let mut session = EditSession::new();
        session.buffer_mut().push_str("make this bold");
        session.style_selection(10..14, InlineStyle::Bold).unwrap();

        assert_eq!(session.buffer(), "make this **bold**");
        assert!(session.document().is_empty());
        assert!(session.style_selection(0..99, InlineStyle::Bold).is_err());
        assert_eq!(session.buffer(), "make this **bold**");
    }

    #[test]
    fn remove_through_session() {
        let doc: Document = ["a", "b"].into_iter().map(Block::paragraph).collect();
        let mut session = EditSession::from_document(doc);

        session.remove(0).unwrap();
        assert!(session.remove(5).is_err());
        assert_eq!(session.into_document().blocks(), &[Block::paragraph("b")]);
    }
}
