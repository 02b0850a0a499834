//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the default load options applied.
///
/// Later sources override earlier ones: defaults, then the options file, then
/// the environment.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("write_on_load", "none")?
        .set_default("fail_on_file_not_found", true)?
        .set_default("fail_on_object_is_default", false)
}
