use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use relative_path::RelativePathBuf;

use super::{ContentId, ContentStore, OwnerId, StorageError, StoredContent};
use crate::content::Document;
use crate::io::replace_file;

const CONTENT_DIR: &str = "content";

/// Store that keeps one JSON envelope per document under `<root>/content/`.
///
/// ```text
/// <root>/content/<id>.json   { "id": ..., "owner": {...}, "body": [blocks] }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of `id`'s envelope relative to the store root
    pub fn relative_path(id: &ContentId) -> RelativePathBuf {
        RelativePathBuf::from(CONTENT_DIR).join(format!("{id}.json"))
    }

    fn path_for(&self, id: &ContentId) -> PathBuf {
        Self::relative_path(id).to_path(&self.root)
    }

    fn read_envelope(&self, path: &Path) -> Result<StoredContent, StorageError> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|source| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the envelope file whole, so a failed write leaves the previous
    /// body readable.
    fn write_envelope(&self, entry: &StoredContent) -> Result<(), StorageError> {
        let path = self.path_for(&entry.id);
        let json = serde_json::to_string_pretty(entry).map_err(StorageError::Encode)?;
        replace_file(&path, |file| file.write_all(json.as_bytes()))?;
        log::info!(
            "Wrote {} blocks for {} to {}",
            entry.body.len(),
            entry.owner,
            path.display()
        );
        Ok(())
    }
}

impl ContentStore for FileStore {
    fn save(&mut self, owner: &OwnerId, document: &Document) -> Result<ContentId, StorageError> {
        let entry = StoredContent {
            id: ContentId::new(),
            owner: *owner,
            body: document.clone(),
        };
        self.write_envelope(&entry)?;
        Ok(entry.id)
    }

    fn update(&mut self, id: &ContentId, document: &Document) -> Result<(), StorageError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StorageError::NotFound(*id));
        }
        let mut entry = self.read_envelope(&path)?;
        entry.body = document.clone();
        self.write_envelope(&entry)
    }

    fn load(&self, id: &ContentId) -> Result<Document, StorageError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StorageError::NotFound(*id));
        }
        Ok(self.read_envelope(&path)?.body)
    }

    fn list(&self) -> Result<Vec<StoredContent>, StorageError> {
        let dir = RelativePathBuf::from(CONTENT_DIR).to_path(&self.root);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut all = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == "json"
            {
                all.push(self.read_envelope(&path)?);
            }
        }
        all.sort_by_key(|entry| entry.id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Block, HeadingLevel};
    use crate::tests::create_test_store_dir;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn envelope_lives_under_content_dir() {
        let id = ContentId::from(Uuid::nil());
        assert_eq!(
            FileStore::relative_path(&id).as_str(),
            "content/00000000-0000-0000-0000-000000000000.json"
        );
    }

    #[test]
    fn save_load_update() {
        let dir = create_test_store_dir();
        let mut store = FileStore::new(dir.path());
        let owner = OwnerId::BlogPost(Uuid::new_v4());
        let doc = Document::new(vec![
            Block::heading(HeadingLevel::H2, "Hi"),
            Block::paragraph("there"),
        ]);

        let id = store.save(&owner, &doc).unwrap();
        assert!(dir.path().join("content").join(format!("{id}.json")).exists());
        assert_eq!(store.load(&id).unwrap(), doc);

        let edited = Document::new(vec![Block::paragraph("rewritten")]);
        store.update(&id, &edited).unwrap();
        assert_eq!(store.load(&id).unwrap(), edited);
        assert_eq!(store.list().unwrap()[0].owner, owner);
    }

    #[test]
    fn interrupted_rewrite_keeps_previous_body() {
        let dir = create_test_store_dir();
        let mut store = FileStore::new(dir.path());
        let owner = OwnerId::BlogPost(Uuid::new_v4());
        let doc = Document::new(vec![Block::paragraph("original")]);
        let id = store.save(&owner, &doc).unwrap();

        let path = store.path_for(&id);
        let result = replace_file(&path, |file| {
            file.write_all(b"{\"id\":")?;
            Err(std::io::Error::other("interrupted"))
        });
        assert!(result.is_err());

        assert_eq!(store.load(&id).unwrap(), doc);
        let entries = fs::read_dir(dir.path().join("content")).unwrap().count();
        assert_eq!(entries, 1);

        store
            .update(&id, &Document::new(vec![Block::paragraph("edited")]))
            .unwrap();
        assert_eq!(store.load(&id).unwrap().get(0).map(Block::text), Some("edited"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn list_is_empty_for_a_fresh_root() {
        let dir = create_test_store_dir();
        let store = FileStore::new(dir.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_is_sorted_by_id() {
        let dir = create_test_store_dir();
        let mut store = FileStore::new(dir.path());
        let owner = OwnerId::ContactReply(Uuid::new_v4());
        let mut ids: Vec<_> = (0..3)
            .map(|_| store.save(&owner, &Document::default()).unwrap())
            .collect();
        ids.sort();

        let listed: Vec<_> = store.list().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn corrupt_envelope_is_a_decode_error() {
        let dir = create_test_store_dir();
        let store = FileStore::new(dir.path());
        let id = ContentId::new();
        let path = Path::new(dir.path()).join("content").join(format!("{id}.json"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(store.load(&id), Err(StorageError::Decode { .. })));
    }

    #[test]
    fn missing_is_not_found() {
        let dir = create_test_store_dir();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load(&ContentId::new()),
            Err(StorageError::NotFound(_))
        ));
    }
}
