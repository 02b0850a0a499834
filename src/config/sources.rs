//! Option sources layered on top of the defaults.

pub mod environment;
pub mod options_file;
