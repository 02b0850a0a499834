//! CLI domain: parse, route and output only.
//! The run context builds load options and dispatches to the loader.

mod output;
mod parse;
mod route;

pub use output::{format_object, map_error};
pub use parse::Cli;
pub use route::RunContext;
