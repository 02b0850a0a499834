//! Integration tests for the JSON settings loader

mod cli;
mod options_config;
mod test_utils;
