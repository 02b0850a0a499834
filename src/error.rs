//! Error types for the JSON settings loader.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a [`JsonStore`](crate::store::JsonStore) implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors returned by `load` and its variants
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Object cannot be loaded because it doesn't contain any properties.")]
    EmptyTemplate,

    #[error("{0}")]
    FileNotFound(String),

    #[error("{0}")]
    ObjectIsDefault(String),

    /// An error supplied by the caller through a `FailPolicy`, returned as is.
    #[error("{0}")]
    Caller(Arc<dyn StdError + Send + Sync>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Loaded values don't fit the target type: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LoadError {
    /// The caller-supplied error, if this failure was escalated with one.
    pub fn caller_error(&self) -> Option<&Arc<dyn StdError + Send + Sync>> {
        match self {
            LoadError::Caller(err) => Some(err),
            _ => None,
        }
    }

    /// True for malformed JSON (or a non-object top level) in an existing file.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LoadError::Store(StoreError::Parse { .. }))
    }
}

impl From<config::ConfigError> for LoadError {
    fn from(err: config::ConfigError) -> Self {
        LoadError::ConfigError(err.to_string())
    }
}
