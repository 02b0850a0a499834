//! Merge rules for load options.

mod merge_policy;

pub use merge_policy::builder_with_defaults;
