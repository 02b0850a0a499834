//! CLI parse: clap types for json-loader. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// json-loader CLI - load a JSON settings file into a template object
#[derive(Parser, Debug)]
#[command(name = "json-loader")]
#[command(about = "Load a JSON settings file into a template object, reconciling stored values with defaults")]
pub struct Cli {
    /// Settings file to load
    pub file: PathBuf,

    /// Template object holding the defaults: inline JSON, or @path to a JSON file
    #[arg(long, short)]
    pub template: String,

    /// Create the settings file from the template if it doesn't exist
    #[arg(long)]
    pub create: bool,

    /// Rewrite the settings file if it is missing values
    #[arg(long)]
    pub update: bool,

    /// Fail if the settings file doesn't exist: true, false, or a custom message
    #[arg(long)]
    pub fail_on_file_not_found: Option<String>,

    /// Fail if the file holds only default values: true, false, or a custom message
    #[arg(long)]
    pub fail_on_object_is_default: Option<String>,

    /// Load options file (TOML or JSON); command-line flags take precedence
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Emit debug and info diagnostics
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}
