use crate::content::{ContentError, Document};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ContentError,
    },
    #[error("Could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read a document from a JSON file
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    Document::from_json_str(&json).map_err(|source| IoError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document to a JSON file, creating parent directories
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    let mut json = document.to_json_string()?;
    json.push('\n');
    replace_file(path, |file| file.write_all(json.as_bytes()))?;
    Ok(())
}

/// Writes `path` through a temp file in the same directory that is renamed
/// over it once `write` succeeds. On failure the old contents stay in place.
pub(crate) fn replace_file(
    path: &Path,
    write: impl FnOnce(&mut fs::File) -> std::io::Result<()>,
) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Read a document, treating a missing file as an empty document
pub fn read_document_or_default(path: &Path) -> Result<Document, IoError> {
    match read_document(path) {
        Err(IoError::NotFound(_)) => Ok(Document::default()),
        other => other,
    }
}
