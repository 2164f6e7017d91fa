//! Persisted JSON form of a document.
//!
//! A document is stored as a JSON array of block objects:
//!
//! ```json
//! [
//!   { "kind": "heading", "text": "Intro", "level": 2 },
//!   { "kind": "list", "text": "first\nsecond" },
//!   { "kind": "link", "text": "Source", "target": "https://example.com" }
//! ]
//! ```
//!
//! Older bodies used `type`, `content` and `url` for the same fields, and some
//! were stored as a JSON-encoded string rather than an array. Both still load.
//! An object that doesn't fit any typed block is kept as an [`UnknownBlock`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Block, BlockKind, ContentError, Document, HeadingLevel};

/// One typed block as it appears in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct RawBlock {
    #[serde(alias = "type")]
    kind: String,
    #[serde(default, alias = "content", deserialize_with = "null_as_empty")]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<i64>,
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored block object that has no typed form: an unknown kind, a heading
/// without a valid level, or fields of the wrong JSON type.
///
/// The object is held exactly as read and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlock(Value);

impl UnknownBlock {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    fn field(&self, name: &str, alias: &str) -> Option<&str> {
        self.0
            .get(name)
            .or_else(|| self.0.get(alias))
            .and_then(Value::as_str)
    }

    /// The stored kind name, if it is a string
    pub fn kind(&self) -> Option<&str> {
        self.field("kind", "type")
    }

    /// The stored text, or `""` when missing or not a string
    pub fn text(&self) -> &str {
        self.field("text", "content").unwrap_or_default()
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

/// Serialized form of a [`Block`].
#[derive(Serialize)]
#[serde(untagged)]
pub(super) enum WireBlock {
    Typed(RawBlock),
    Kept(Value),
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        RawBlock::deserialize(&value)
            .ok()
            .and_then(typed_block)
            .unwrap_or_else(|| Block::Unrecognized(UnknownBlock::new(value)))
    }
}

fn typed_block(raw: RawBlock) -> Option<Block> {
    let kind = raw.kind.parse::<BlockKind>().ok()?;
    let block = match kind {
        BlockKind::Heading => Block::Heading {
            level: HeadingLevel::try_from(raw.level?).ok()?,
            text: raw.text,
        },
        BlockKind::Paragraph => Block::Paragraph { text: raw.text },
        BlockKind::Quote => Block::Quote { text: raw.text },
        BlockKind::Code => Block::Code { text: raw.text },
        BlockKind::List => Block::List { text: raw.text },
        BlockKind::OrderedList => Block::OrderedList { text: raw.text },
        BlockKind::Link => Block::Link {
            text: raw.text,
            target: raw.target,
        },
        BlockKind::Image => Block::Image {
            text: raw.text,
            target: raw.target,
        },
    };
    Some(block)
}

impl From<Block> for WireBlock {
    fn from(block: Block) -> Self {
        let (kind, text, level, target) = match block {
            Block::Paragraph { text } => (BlockKind::Paragraph, text, None, None),
            Block::Heading { level, text } => (
                BlockKind::Heading,
                text,
                Some(i64::from(level.rank())),
                None,
            ),
            Block::Quote { text } => (BlockKind::Quote, text, None, None),
            Block::Code { text } => (BlockKind::Code, text, None, None),
            Block::List { text } => (BlockKind::List, text, None, None),
            Block::OrderedList { text } => (BlockKind::OrderedList, text, None, None),
            Block::Link { text, target } => (BlockKind::Link, text, None, target),
            Block::Image { text, target } => (BlockKind::Image, text, None, target),
            Block::Unrecognized(UnknownBlock(value)) => return WireBlock::Kept(value),
        };

        WireBlock::Typed(RawBlock {
            kind: kind.as_str().to_string(),
            text,
            level,
            target,
        })
    }
}

impl Document {
    /// Decodes a stored body. See the module docs for the accepted shapes.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, ContentError> {
        match value {
            Value::Null => Ok(Document::default()),
            Value::Array(entries) => Ok(decode_entries(entries)),
            Value::String(encoded) => match serde_json::from_str::<Value>(&encoded)? {
                Value::Null => Ok(Document::default()),
                Value::Array(entries) => Ok(decode_entries(entries)),
                other => Err(ContentError::NotAnArray {
                    found: json_type_name(&other),
                }),
            },
            other => Err(ContentError::NotAnArray {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_json_value(value).map_err(serde::de::Error::custom)
    }
}

fn decode_entries(entries: Vec<Value>) -> Document {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                log::warn!(
                    "Skipping persisted block {index}: expected an object, found {}",
                    json_type_name(&entry)
                );
                return None;
            }
            let block = Block::from(entry);
            if let Block::Unrecognized(unknown) = &block {
                log::debug!("Keeping persisted block {index} as is: {}", unknown.value());
            }
            Some(block)
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
