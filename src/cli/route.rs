//! CLI route: run context. Resolves options and dispatches to the loader.

use crate::cli::output::format_object;
use crate::cli::parse::Cli;
use crate::config::OptionsLoader;
use crate::diagnostics::DiagnosticSink;
use crate::error::LoadError;
use crate::loader::Loader;
use crate::options::{ConsoleOptions, FailPolicy, LoadOptions, WriteOnLoad};
use crate::store::{parse_settings, FileStore, JsonStore};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime context for one CLI invocation: target file, template and options.
pub struct RunContext {
    file: PathBuf,
    template: Map<String, Value>,
    options: LoadOptions,
}

impl RunContext {
    /// Build the context from parsed arguments. Command-line flags override the
    /// options file and environment.
    pub fn new(cli: &Cli) -> Result<Self, LoadError> {
        let options = OptionsLoader::load(cli.options.as_deref())?;
        Self::with_options(cli, options)
    }

    /// Build the context on top of already loaded options.
    pub fn with_options(cli: &Cli, mut options: LoadOptions) -> Result<Self, LoadError> {
        if cli.create {
            options.write_on_load |= WriteOnLoad::CREATE;
        }
        if cli.update {
            options.write_on_load |= WriteOnLoad::UPDATE;
        }
        if let Some(ref value) = cli.fail_on_file_not_found {
            options.fail_on_file_not_found = FailPolicy::parse_flag(value);
        }
        if let Some(ref value) = cli.fail_on_object_is_default {
            options.fail_on_object_is_default = FailPolicy::parse_flag(value);
        }
        if cli.verbose {
            options.console_options = Some(ConsoleOptions::verbose());
        }

        let template = parse_template(&cli.template)?;
        debug!(
            file = %cli.file.display(),
            write_on_load = %options.write_on_load,
            keys = template.len(),
            "CLI context initialized"
        );

        Ok(Self {
            file: cli.file.clone(),
            template,
            options,
        })
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn template(&self) -> &Map<String, Value> {
        &self.template
    }

    /// Whether debug and info diagnostics are enabled, from any source.
    pub fn verbose(&self) -> bool {
        self.options.console_scope().verbose
    }

    /// Load the settings file from disk, reporting through `tracing`.
    pub fn execute(&self) -> Result<String, LoadError> {
        self.execute_with(&mut Loader::new())
    }

    /// Load with the given loader and render the resulting object.
    pub fn execute_with<S, D>(&self, loader: &mut Loader<S, D>) -> Result<String, LoadError>
    where
        S: JsonStore,
        D: DiagnosticSink,
    {
        let mut object = self.template.clone();
        loader.load_value(&self.file, &mut object, &self.options)?;
        format_object(&object)
    }
}

/// Inline JSON object, or `@path` naming a JSON file that holds one.
fn parse_template(arg: &str) -> Result<Map<String, Value>, LoadError> {
    match arg.strip_prefix('@') {
        Some(path) => Ok(FileStore.read_json(Path::new(path))?),
        None => Ok(parse_settings(Path::new("<template>"), arg)?),
    }
}
