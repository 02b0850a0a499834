//! Shared test utilities for integration tests

use json_loader::{FileStore, Loader, RecordingSink};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestClass1 {
    pub string_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestClass2 {
    pub string_value: String,
    pub number_value: i64,
}

/// A temporary directory holding `TestSettings.json`, plus a loader that
/// records every diagnostic it lets through.
pub struct Fixture {
    // Kept alive for the duration of the test
    _dir: TempDir,
    pub path: PathBuf,
    pub sink: RecordingSink,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("TestSettings.json");
        Self {
            _dir: dir,
            path,
            sink: RecordingSink::new(),
        }
    }

    pub fn loader(&self) -> Loader<FileStore, RecordingSink> {
        Loader::with_parts(FileStore, self.sink.clone())
    }

    /// Path as it appears in diagnostics.
    pub fn file(&self) -> String {
        self.path.display().to_string()
    }

    pub fn write(&self, contents: &str) {
        std::fs::write(&self.path, contents).unwrap();
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
