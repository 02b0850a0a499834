//! Settings File Store
//!
//! Existence check, read and write of JSON settings files. Files hold a single
//! JSON object, pretty-printed with a 4-space indent and no trailing newline.

use crate::error::StoreError;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Indent used for every settings file written by this crate
pub const INDENT: &[u8] = b"    ";

/// Settings file store interface
pub trait JsonStore {
    fn exists(&self, path: &Path) -> bool;

    /// Read and parse the file at `path`. The top-level value must be an object.
    fn read_json(&self, path: &Path) -> Result<Map<String, Value>, StoreError>;

    fn write_json(&self, path: &Path, value: &Map<String, Value>) -> Result<(), StoreError>;
}

impl<T: JsonStore + ?Sized> JsonStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_json(&self, path: &Path) -> Result<Map<String, Value>, StoreError> {
        (**self).read_json(path)
    }

    fn write_json(&self, path: &Path, value: &Map<String, Value>) -> Result<(), StoreError> {
        (**self).write_json(path, value)
    }
}

/// Serialize `value` the way settings files are written.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Parse settings text read from `path`.
pub fn parse_settings(path: &Path, text: &str) -> Result<Map<String, Value>, StoreError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Parse {
            path: path.to_path_buf(),
            message: format!(
                "expected a JSON object at the top level, found {}",
                json_type_name(&other)
            ),
        }),
        Err(e) => Err(StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
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

/// Store backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl JsonStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_json(&self, path: &Path) -> Result<Map<String, Value>, StoreError> {
        trace!(path = %path.display(), "Reading settings file");
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_settings(path, &text)
    }

    fn write_json(&self, path: &Path, value: &Map<String, Value>) -> Result<(), StoreError> {
        trace!(path = %path.display(), keys = value.len(), "Writing settings file");
        let text = to_pretty_json(value)?;
        std::fs::write(path, text).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// In-memory store keyed by path. Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw file contents at `path`, replacing any previous contents.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().remove(path.as_ref())
    }

    /// Number of `write_json` calls served so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl JsonStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn read_json(&self, path: &Path) -> Result<Map<String, Value>, StoreError> {
        let text = self.contents(path).ok_or_else(|| StoreError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        parse_settings(path, &text)
    }

    fn write_json(&self, path: &Path, value: &Map<String, Value>) -> Result<(), StoreError> {
        let text = to_pretty_json(value)?;
        self.files.lock().insert(path.to_path_buf(), text);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
