use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::content::{Block, Document, HeadingLevel};


/// Create a temporary directory to act as a store root
pub fn create_test_store_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content, relative to the temp dir
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// A short post using every text kind
pub fn sample_document() -> Document {
    Document::new(vec![
        Block::heading(HeadingLevel::H1, "Release notes"),
        Block::paragraph("This release is **faster**."),
        Block::List {
            text: "Parser\nRenderer".to_string(),
        },
        Block::Link {
            text: "Changelog".to_string(),
            target: Some("https://example.com/changelog".to_string()),
        },
    ])
}
