//! json-loader CLI Binary
//!
//! Loads a JSON settings file into a template object and prints the result.

use clap::Parser;
use json_loader::cli::{map_error, Cli, RunContext};
use json_loader::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Options decide the verbosity, so they are resolved before logging starts
    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, context.verbose());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("json-loader starting");

    match context.execute() {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Load failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args.
/// Verbose load options lower the level so debug diagnostics reach the terminal.
fn build_logging_config(cli: &Cli, verbose: bool) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
