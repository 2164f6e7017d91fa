use std::collections::HashMap;

use super::{ContentId, ContentStore, OwnerId, StorageError, StoredContent};
use crate::content::Document;

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<ContentId, StoredContent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn save(&mut self, owner: &OwnerId, document: &Document) -> Result<ContentId, StorageError> {
        let id = ContentId::new();
        self.entries.insert(
            id,
            StoredContent {
                id,
                owner: *owner,
                body: document.clone(),
            },
        );
        log::debug!("Stored {} blocks for {owner} as {id}", document.len());
        Ok(id)
    }

    fn update(&mut self, id: &ContentId, document: &Document) -> Result<(), StorageError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(StorageError::NotFound(*id))?;
        entry.body = document.clone();
        Ok(())
    }

    fn load(&self, id: &ContentId) -> Result<Document, StorageError> {
        self.entries
            .get(id)
            .map(|entry| entry.body.clone())
            .ok_or(StorageError::NotFound(*id))
    }

    fn list(&self) -> Result<Vec<StoredContent>, StorageError> {
        let mut all: Vec<_> = self.entries.values().cloned().collect();
        all.sort_by_key(|entry| entry.id);
        Ok(all)
    }
}
