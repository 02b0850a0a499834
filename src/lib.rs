//! json-loader: Settings Files for Pre-populated Objects
//!
//! Loads property values from a JSON file into an object that already holds its
//! default values. Stored values replace defaults key by key, unknown keys in the
//! file are skipped, and the file can be created or completed from the object.
//!
//! ```no_run
//! use json_loader::{load, LoadOptions, WriteOnLoad};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct MySettings {
//!     string_value: String,
//! }
//!
//! let settings = load(
//!     "./mySettings.json",
//!     MySettings { string_value: "Short description used as the default value".into() },
//!     &LoadOptions::default()
//!         .with_write_on_load(WriteOnLoad::CREATE)
//!         .with_fail_on_file_not_found(false),
//! )
//! .expect("settings");
//! println!("{}", settings.string_value);
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod logging;
pub mod options;
pub mod reconcile;
pub mod store;
pub mod value;

pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Level, RecordingSink, TracingSink};
pub use error::{LoadError, StoreError};
pub use loader::{load, load_value, Loader};
pub use options::{ConsoleOptions, FailPolicy, LoadOptions, Policy, WriteOnLoad};
pub use store::{FileStore, JsonStore, MemoryStore};
