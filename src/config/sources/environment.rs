//! Environment source: `JSON_LOADER_WRITE_ON_LOAD`, `JSON_LOADER_FAIL_ON_FILE_NOT_FOUND`, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Prefix shared by every environment variable read as a load option
pub const ENV_PREFIX: &str = "JSON_LOADER";

/// Add `JSON_LOADER_*` variables to the builder. `true`/`false` and numbers are
/// parsed, everything else stays a string.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .try_parsing(true),
    )
}
