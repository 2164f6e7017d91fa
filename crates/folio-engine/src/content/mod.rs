//! # Block content model
//!
//! A [`Document`] is an ordered sequence of [`Block`]s. Each block is one typed
//! unit of long-form content: a paragraph, a heading, a list and so on. Order is
//! rendering order.
//!
//! Documents are produced wholesale by an editing session (see
//! [`crate::editing`]) and persisted as a single JSON array (see [`wire`]).
//! Content that cannot be understood on load is kept as
//! [`Block::Unrecognized`] so it survives a load/save cycle untouched.

pub mod error;
pub mod wire;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{ContentError, ValidationError};
pub use wire::UnknownBlock;

/// The kind of a block, without its payload.
///
/// Displays and parses as the persisted wire name (`"ordered-list"` etc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Quote,
    Code,
    List,
    OrderedList,
    Link,
    Image,
}

impl BlockKind {
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::List,
        BlockKind::OrderedList,
        BlockKind::Link,
        BlockKind::Image,
    ];

    /// Name used in the persisted JSON form
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::List => "list",
            BlockKind::OrderedList => "ordered-list",
            BlockKind::Link => "link",
            BlockKind::Image => "image",
        }
    }

    /// Human-readable name for editor previews
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "Paragraph",
            BlockKind::Heading => "Heading",
            BlockKind::Quote => "Quote",
            BlockKind::Code => "Code Block",
            BlockKind::List => "List",
            BlockKind::OrderedList => "Ordered List",
            BlockKind::Link => "Link",
            BlockKind::Image => "Image",
        }
    }

    /// Link and image blocks carry a target URL and may be created without text.
    pub fn has_target(self) -> bool {
        matches!(self, BlockKind::Link | BlockKind::Image)
    }

    /// Caption used when a link or image is appended without text
    pub fn placeholder_caption(self) -> Option<&'static str> {
        match self {
            BlockKind::Link => Some("Link text"),
            BlockKind::Image => Some("Image description"),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownKind(s.to_string()))
    }
}

/// Visual rank of a heading. Only three ranks exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
}

impl HeadingLevel {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for HeadingLevel {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(ValidationError::HeadingLevelOutOfRange(other)),
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HeadingLevel::try_from(i64::from(value))
    }
}

/// One typed unit of content.
///
/// `text` is the block's primary payload. For lists it holds newline-separated
/// items; for links and images it is the label or caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "wire::WireBlock")]
pub enum Block {
    Paragraph { text: String },
    Heading { level: HeadingLevel, text: String },
    Quote { text: String },
    Code { text: String },
    List { text: String },
    OrderedList { text: String },
    Link { text: String, target: Option<String> },
    Image { text: String, target: Option<String> },
    /// Persisted content with an unknown kind, or fields that don't fit its kind.
    /// Rendered as a paragraph and written back exactly as it was read.
    Unrecognized(UnknownBlock),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// `None` for unrecognized blocks
    pub fn kind(&self) -> Option<BlockKind> {
        match self {
            Block::Paragraph { .. } => Some(BlockKind::Paragraph),
            Block::Heading { .. } => Some(BlockKind::Heading),
            Block::Quote { .. } => Some(BlockKind::Quote),
            Block::Code { .. } => Some(BlockKind::Code),
            Block::List { .. } => Some(BlockKind::List),
            Block::OrderedList { .. } => Some(BlockKind::OrderedList),
            Block::Link { .. } => Some(BlockKind::Link),
            Block::Image { .. } => Some(BlockKind::Image),
            Block::Unrecognized(_) => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph { text }
            | Block::Heading { text, .. }
            | Block::Quote { text }
            | Block::Code { text }
            | Block::List { text }
            | Block::OrderedList { text }
            | Block::Link { text, .. }
            | Block::Image { text, .. } => text,
            Block::Unrecognized(unknown) => unknown.text(),
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Block::Link { target, .. } | Block::Image { target, .. } => target.as_deref(),
            _ => None,
        }
    }

    /// Editor preview label, e.g. "Heading 2" or "Ordered List"
    pub fn label(&self) -> String {
        match self {
            Block::Heading { level, .. } => format!("Heading {}", level.rank()),
            Block::Unrecognized(unknown) => {
                format!("Unknown ({})", unknown.kind().unwrap_or("?"))
            }
            other => other
                .kind()
                .map(BlockKind::label)
                .unwrap_or("Paragraph")
                .to_string(),
        }
    }
}

/// An ordered sequence of blocks: one blog post body or one reply body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Copy of this document with `block` added at the end
    pub(crate) fn with_block(&self, block: Block) -> Self {
        let mut blocks = Vec::with_capacity(self.blocks.len() + 1);
        blocks.extend(self.blocks.iter().cloned());
        blocks.push(block);
        Self { blocks }
    }

    /// Copy of this document without the block at `index`. Caller checks bounds.
    pub(crate) fn without_block(&self, index: usize) -> Self {
        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, block)| block.clone())
            .collect();
        Self { blocks }
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("paragraph", BlockKind::Paragraph)]
    #[case("heading", BlockKind::Heading)]
    #[case("quote", BlockKind::Quote)]
    #[case("code", BlockKind::Code)]
    #[case("list", BlockKind::List)]
    #[case("ordered-list", BlockKind::OrderedList)]
    #[case("link", BlockKind::Link)]
    #[case("image", BlockKind::Image)]
    fn kind_names_parse_and_display(#[case] name: &str, #[case] kind: BlockKind) {
        assert_eq!(name.parse::<BlockKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), name);
    }

    #[test]
    fn unknown_kind_name_is_rejected() {
        let err = "Heading".parse::<BlockKind>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownKind("Heading".to_string()));
    }

    #[test]
    fn heading_levels_are_never_clamped() {
        assert_eq!(HeadingLevel::try_from(1u8).unwrap(), HeadingLevel::H1);
        assert_eq!(HeadingLevel::try_from(3i64).unwrap().rank(), 3);
        assert_eq!(
            HeadingLevel::try_from(0u8),
            Err(ValidationError::HeadingLevelOutOfRange(0))
        );
        assert_eq!(
            HeadingLevel::try_from(4i64),
            Err(ValidationError::HeadingLevelOutOfRange(4))
        );
        assert_eq!(
            HeadingLevel::try_from(-1i64),
            Err(ValidationError::HeadingLevelOutOfRange(-1))
        );
    }

    #[test]
    fn only_links_and_images_have_targets() {
        let with_target: Vec<_> = BlockKind::ALL
            .into_iter()
            .filter(|k| k.has_target())
            .collect();
        assert_eq!(with_target, vec![BlockKind::Link, BlockKind::Image]);
        assert_eq!(BlockKind::Link.placeholder_caption(), Some("Link text"));
        assert_eq!(BlockKind::Quote.placeholder_caption(), None);
    }

    #[test]
    fn block_accessors() {
        let link = Block::Link {
            text: "Docs".to_string(),
            target: Some("https://example.com".to_string()),
        };
        assert_eq!(link.kind(), Some(BlockKind::Link));
        assert_eq!(link.text(), "Docs");
        assert_eq!(link.target(), Some("https://example.com"));

        let para = Block::paragraph("Body");
        assert_eq!(para.target(), None);
        assert_eq!(para.label(), "Paragraph");
    }

    #[test]
    fn labels_for_preview() {
        assert_eq!(Block::heading(HeadingLevel::H2, "x").label(), "Heading 2");
        assert_eq!(
            Block::OrderedList {
                text: "a".to_string()
            }
            .label(),
            "Ordered List"
        );

        let unknown = Block::Unrecognized(UnknownBlock::new(serde_json::json!({
            "kind": "bogus",
            "text": "x"
        })));
        assert_eq!(unknown.kind(), None);
        assert_eq!(unknown.text(), "x");
        assert_eq!(unknown.label(), "Unknown (bogus)");
    }

    #[test]
    fn with_block_leaves_original_untouched() {
        let doc = Document::new(vec![Block::paragraph("one")]);
        let longer = doc.with_block(Block::paragraph("two"));

        assert_eq!(doc.len(), 1);
        assert_eq!(longer.len(), 2);
        assert_eq!(longer.get(1).map(Block::text), Some("two"));
    }

    #[test]
    fn without_block_shifts_later_blocks_left() {
        let doc: Document = ["a", "b", "c"].into_iter().map(Block::paragraph).collect();
        let shorter = doc.without_block(1);

        let texts: Vec<_> = shorter.iter().map(Block::text).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(doc.len(), 3);
    }
}
