//! Configuration System
//!
//! Builds [`LoadOptions`] from layered sources: built-in defaults, an optional
//! options file (TOML or JSON) and `JSON_LOADER_*` environment variables, in
//! increasing order of precedence.

use crate::error::LoadError;
use crate::options::LoadOptions;
use std::path::Path;
use tracing::debug;

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;

/// Loads [`LoadOptions`] from configuration sources
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load options from defaults, `options_file` (if given) and the environment.
    pub fn load(options_file: Option<&Path>) -> Result<LoadOptions, LoadError> {
        let mut builder = merge::builder_with_defaults()?;
        if let Some(path) = options_file {
            debug!(options_file = %path.display(), "Loading options file");
            builder = sources::options_file::add_to_builder(builder, path);
        }
        builder = sources::environment::add_to_builder(builder);

        let options = builder.build()?.try_deserialize::<LoadOptions>()?;
        Ok(options)
    }

    /// Load options from a single file, ignoring the environment.
    pub fn load_from_file(options_file: &Path) -> Result<LoadOptions, LoadError> {
        let builder = sources::options_file::add_to_builder(
            merge::builder_with_defaults()?,
            options_file,
        );
        Ok(builder.build()?.try_deserialize::<LoadOptions>()?)
    }
}
