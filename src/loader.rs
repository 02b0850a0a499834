//! Loader
//!
//! Caller-facing entry points. A [`Loader`] owns the store and the diagnostics
//! context; every call pushes the console options derived from its
//! [`LoadOptions`] for the duration of the reconciliation.

use crate::diagnostics::{DiagnosticSink, Diagnostics, TracingSink};
use crate::error::LoadError;
use crate::options::{LoadOptions, Policy};
use crate::reconcile::reconcile;
use crate::store::{FileStore, JsonStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Once;
use tracing::instrument;

static LEGACY_VERBOSE_NOTICE: Once = Once::new();

/// Loads settings files into template objects
#[derive(Debug)]
pub struct Loader<S = FileStore, D = TracingSink> {
    store: S,
    diagnostics: Diagnostics<D>,
}

impl Loader {
    /// Loader for the local file system reporting through `tracing`.
    pub fn new() -> Self {
        Self::with_parts(FileStore, TracingSink)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: JsonStore, D: DiagnosticSink> Loader<S, D> {
    pub fn with_parts(store: S, sink: D) -> Self {
        Self {
            store,
            diagnostics: Diagnostics::new(sink),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn diagnostics(&self) -> &Diagnostics<D> {
        &self.diagnostics
    }

    /// Load `path` into `template` in place.
    #[instrument(level = "trace", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_value(
        &mut self,
        path: impl AsRef<Path>,
        template: &mut Map<String, Value>,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        note_legacy_verbose(options);
        let policy = Policy::from(options);
        let scope = self.diagnostics.push(options.console_scope());
        reconcile(&self.store, &*scope, path.as_ref(), template, &policy)
    }

    /// Load `path` into a typed object in place.
    ///
    /// The object must serialize to a JSON object with at least one property,
    /// and the reconciled values must deserialize back into `T`. On failure the
    /// object keeps its previous state.
    pub fn load_into<T>(
        &mut self,
        path: impl AsRef<Path>,
        object: &mut T,
        options: &LoadOptions,
    ) -> Result<(), LoadError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut template = match serde_json::to_value(&*object) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(LoadError::EmptyTemplate),
            Err(e) => return Err(LoadError::Conversion(e.to_string())),
        };
        self.load_value(path, &mut template, options)?;
        *object = serde_json::from_value(Value::Object(template))
            .map_err(|e| LoadError::Conversion(e.to_string()))?;
        Ok(())
    }

    /// Load `path` into `object` and hand it back.
    pub fn load<T>(
        &mut self,
        path: impl AsRef<Path>,
        mut object: T,
        options: &LoadOptions,
    ) -> Result<T, LoadError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_into(path, &mut object, options)?;
        Ok(object)
    }
}

/// Load `path` into `object` using the file system and `tracing`.
pub fn load<T>(path: impl AsRef<Path>, object: T, options: &LoadOptions) -> Result<T, LoadError>
where
    T: Serialize + DeserializeOwned,
{
    Loader::new().load(path, object, options)
}

/// Load `path` into an untyped template using the file system and `tracing`.
pub fn load_value(
    path: impl AsRef<Path>,
    template: &mut Map<String, Value>,
    options: &LoadOptions,
) -> Result<(), LoadError> {
    Loader::new().load_value(path, template, options)
}

fn note_legacy_verbose(options: &LoadOptions) {
    if options.verbose_logging.is_some() {
        LEGACY_VERBOSE_NOTICE.call_once(|| {
            tracing::warn!(
                "The 'verbose_logging' member of LoadOptions is deprecated and may be removed \
                 with the next major version. Use the 'console_options' member instead."
            )
        });
    }
}
