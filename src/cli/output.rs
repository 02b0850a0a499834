//! CLI output: loaded objects and error mapping for the CLI surface.

use crate::error::LoadError;
use crate::store::to_pretty_json;
use serde_json::{Map, Value};

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &LoadError) -> String {
    e.to_string()
}

/// Render a loaded object the same way settings files are written.
pub fn format_object(object: &Map<String, Value>) -> Result<String, LoadError> {
    to_pretty_json(object).map_err(|e| LoadError::Conversion(e.to_string()))
}
