//! # Storage boundary
//!
//! Documents are persisted whole, one per owning record. The editor never
//! stores partial state: `save` takes a complete document and returns the id
//! it was stored under, `load` returns the complete document for an id.
//!
//! [`ContentStore`] is the seam. [`MemoryStore`] backs tests and scripted
//! sessions; [`FileStore`] keeps one JSON envelope per document on disk.

pub mod file;
pub mod memory;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::Document;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Identifier a stored document is saved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ContentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// The record a document body belongs to.
///
/// Text form is `post:<uuid>` or `reply:<uuid>`, where a reply is keyed by the
/// contact message it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum OwnerId {
    BlogPost(Uuid),
    ContactReply(Uuid),
}

impl OwnerId {
    pub fn uuid(&self) -> Uuid {
        match self {
            OwnerId::BlogPost(id) | OwnerId::ContactReply(id) => *id,
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            OwnerId::BlogPost(_) => "post",
            OwnerId::ContactReply(_) => "reply",
        }
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix(), self.uuid())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnerIdError {
    #[error("Expected an owner like post:<uuid> or reply:<uuid>, got {0:?}")]
    Malformed(String),
    #[error("Unknown owner kind {0:?} (expected post or reply)")]
    UnknownKind(String),
    #[error("Invalid owner id: {0}")]
    InvalidUuid(#[from] uuid::Error),
}

impl FromStr for OwnerId {
    type Err = OwnerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| OwnerIdError::Malformed(s.to_string()))?;
        let id = Uuid::parse_str(id)?;
        match kind {
            "post" => Ok(OwnerId::BlogPost(id)),
            "reply" => Ok(OwnerId::ContactReply(id)),
            other => Err(OwnerIdError::UnknownKind(other.to_string())),
        }
    }
}

/// A stored document with the record it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContent {
    pub id: ContentId,
    pub owner: OwnerId,
    pub body: Document,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No stored content with id {0}")]
    NotFound(ContentId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not decode stored content at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode content: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Persistence collaborator for documents.
///
/// Each call is one atomic request: either the whole document is stored or
/// the call fails. Failures are surfaced as-is; there is no retry.
pub trait ContentStore {
    /// Stores `document` for `owner` under a fresh id.
    fn save(&mut self, owner: &OwnerId, document: &Document) -> Result<ContentId, StorageError>;

    /// Replaces the body stored under `id`, keeping its owner.
    fn update(&mut self, id: &ContentId, document: &Document) -> Result<(), StorageError>;

    fn load(&self, id: &ContentId) -> Result<Document, StorageError>;

    /// Everything stored, ordered by id.
    fn list(&self) -> Result<Vec<StoredContent>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn owner_text_form() {
        let id = Uuid::parse_str(ID).unwrap();
        let post: OwnerId = format!("post:{ID}").parse().unwrap();
        let reply: OwnerId = format!("reply:{ID}").parse().unwrap();

        assert_eq!(post, OwnerId::BlogPost(id));
        assert_eq!(reply, OwnerId::ContactReply(id));
        assert_eq!(post.to_string(), format!("post:{ID}"));
        assert_eq!(reply.to_string(), format!("reply:{ID}"));
    }

    #[test]
    fn bad_owner_strings() {
        assert!(matches!(
            ID.parse::<OwnerId>(),
            Err(OwnerIdError::Malformed(_))
        ));
        assert!(matches!(
            "post".parse::<OwnerId>(),
            Err(OwnerIdError::Malformed(_))
        ));
        assert!(matches!(
            format!("page:{ID}").parse::<OwnerId>(),
            Err(OwnerIdError::UnknownKind(kind)) if kind == "page"
        ));
        assert!(matches!(
            "post:nope".parse::<OwnerId>(),
            Err(OwnerIdError::InvalidUuid(_))
        ));
    }

    #[test]
    fn owner_serializes_with_kind_and_id() {
        let owner = OwnerId::ContactReply(Uuid::parse_str(ID).unwrap());
        assert_eq!(
            serde_json::to_value(owner).unwrap(),
            json!({ "kind": "contact-reply", "id": ID })
        );
    }

    #[test]
    fn content_ids_are_unique_and_parse_back() {
        let a = ContentId::new();
        let b = ContentId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string().parse::<ContentId>().unwrap(), a);
    }
}
