//! Load Options
//!
//! Caller-facing options for `load` and the [`Policy`] resolved from them once
//! per call. Options deserialize from TOML/JSON/environment through serde so the
//! CLI and embedders can keep them in an options file.

use crate::diagnostics::Level;
use crate::error::LoadError;
use serde::{Deserialize, Deserializer};
use std::error::Error as StdError;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Write behaviour of `load`, combinable with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WriteOnLoad(u8);

impl WriteOnLoad {
    /// Do not create nor update the requested JSON file
    pub const NONE: WriteOnLoad = WriteOnLoad(0);
    /// Create the requested file if it doesn't exist
    pub const CREATE: WriteOnLoad = WriteOnLoad(1);
    /// Rewrite the requested file if it is missing one or more property values
    pub const UPDATE: WriteOnLoad = WriteOnLoad(2);

    const ALL_BITS: u8 = 0b11;

    /// Build from raw bits, rejecting bits outside `CREATE | UPDATE`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL_BITS == 0 {
            Some(WriteOnLoad(bits))
        } else {
            None
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Bitwise containment. Every value contains `NONE`.
    pub fn contains(self, other: WriteOnLoad) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WriteOnLoad {
    type Output = WriteOnLoad;

    fn bitor(self, rhs: WriteOnLoad) -> WriteOnLoad {
        WriteOnLoad(self.0 | rhs.0)
    }
}

impl BitOrAssign for WriteOnLoad {
    fn bitor_assign(&mut self, rhs: WriteOnLoad) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for WriteOnLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::CREATE), self.contains(Self::UPDATE)) {
            (false, false) => write!(f, "none"),
            (true, false) => write!(f, "create"),
            (false, true) => write!(f, "update"),
            (true, true) => write!(f, "create|update"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid write_on_load value '{0}' (expected 0-3, or none/create/update joined by '|')")]
pub struct ParseWriteOnLoadError(String);

impl FromStr for WriteOnLoad {
    type Err = ParseWriteOnLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(bits) = trimmed.parse::<u8>() {
            return WriteOnLoad::from_bits(bits).ok_or_else(|| ParseWriteOnLoadError(s.to_string()));
        }

        let mut flags = WriteOnLoad::NONE;
        for part in trimmed.split(['|', ',']) {
            match part.trim().to_ascii_lowercase().as_str() {
                "none" => {}
                "create" => flags |= WriteOnLoad::CREATE,
                "update" => flags |= WriteOnLoad::UPDATE,
                _ => return Err(ParseWriteOnLoadError(s.to_string())),
            }
        }
        Ok(flags)
    }
}

impl<'de> Deserialize<'de> for WriteOnLoad {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bits(u64),
            Names(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bits(bits) => u8::try_from(bits)
                .ok()
                .and_then(WriteOnLoad::from_bits)
                .ok_or_else(|| serde::de::Error::custom(ParseWriteOnLoadError(bits.to_string()))),
            Raw::Names(names) => names.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Whether a condition fails the call or is only reported.
///
/// - `Off`: report the default message at `error` level and carry on
/// - `On`: fail with the default message
/// - `Message`: fail with this message instead
/// - `Error`: fail with this exact error
#[derive(Clone, Debug)]
pub enum FailPolicy {
    Off,
    On,
    Message(String),
    Error(Arc<dyn StdError + Send + Sync>),
}

/// Outcome of resolving a [`FailPolicy`] against a default message.
#[derive(Debug)]
pub(crate) enum Disposition {
    Log(String),
    Fail(LoadError),
}

impl FailPolicy {
    /// Wrap a caller error so it is returned unchanged on escalation.
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        FailPolicy::Error(Arc::new(err))
    }

    /// Parse a command-line style value: `true`/`false` toggle the default
    /// message, anything else becomes a custom message.
    pub fn parse_flag(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" => FailPolicy::On,
            "false" | "off" | "no" => FailPolicy::Off,
            _ => FailPolicy::Message(value.to_string()),
        }
    }

    pub fn escalates(&self) -> bool {
        !matches!(self, FailPolicy::Off)
    }

    pub(crate) fn resolve(
        &self,
        default_message: String,
        escalate: impl FnOnce(String) -> LoadError,
    ) -> Disposition {
        match self {
            FailPolicy::Error(err) => Disposition::Fail(LoadError::Caller(Arc::clone(err))),
            FailPolicy::Message(message) => Disposition::Fail(escalate(message.clone())),
            FailPolicy::On => Disposition::Fail(escalate(default_message)),
            FailPolicy::Off => Disposition::Log(default_message),
        }
    }
}

impl PartialEq for FailPolicy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FailPolicy::Off, FailPolicy::Off) | (FailPolicy::On, FailPolicy::On) => true,
            (FailPolicy::Message(a), FailPolicy::Message(b)) => a == b,
            (FailPolicy::Error(a), FailPolicy::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for FailPolicy {
    fn from(fail: bool) -> Self {
        if fail {
            FailPolicy::On
        } else {
            FailPolicy::Off
        }
    }
}

impl From<&str> for FailPolicy {
    fn from(message: &str) -> Self {
        FailPolicy::Message(message.to_string())
    }
}

impl From<String> for FailPolicy {
    fn from(message: String) -> Self {
        FailPolicy::Message(message)
    }
}

impl<'de> Deserialize<'de> for FailPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Number(i64),
            Message(String),
        }

        // Numeric environment values arrive as integers
        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(flag.into()),
            Raw::Number(0) => Ok(FailPolicy::Off),
            Raw::Number(1) => Ok(FailPolicy::On),
            Raw::Number(other) => Err(serde::de::Error::custom(format!(
                "invalid fail policy {} (expected true, false, 0, 1 or a message)",
                other
            ))),
            Raw::Message(message) => Ok(message.into()),
        }
    }
}

/// Verbosity of the diagnostics emitted during one `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleOptions {
    /// Emit `debug` and `info` diagnostics; `warn` and `error` always pass.
    pub verbose: bool,
}

impl ConsoleOptions {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    pub fn allows(&self, level: Level) -> bool {
        self.verbose || level >= Level::Warn
    }
}

/// Options to specify in calls of `load`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub write_on_load: WriteOnLoad,

    /// Applies when the file is absent, even if it was just created.
    pub fail_on_file_not_found: FailPolicy,

    /// Applies when no stored value differs from the object's defaults.
    pub fail_on_object_is_default: FailPolicy,

    pub console_options: Option<ConsoleOptions>,

    /// **Deprecated**, use `console_options` instead.
    pub verbose_logging: Option<bool>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            write_on_load: WriteOnLoad::NONE,
            fail_on_file_not_found: FailPolicy::On,
            fail_on_object_is_default: FailPolicy::Off,
            console_options: None,
            verbose_logging: None,
        }
    }
}

impl LoadOptions {
    pub fn with_write_on_load(mut self, write_on_load: WriteOnLoad) -> Self {
        self.write_on_load = write_on_load;
        self
    }

    pub fn with_fail_on_file_not_found(mut self, policy: impl Into<FailPolicy>) -> Self {
        self.fail_on_file_not_found = policy.into();
        self
    }

    pub fn with_fail_on_object_is_default(mut self, policy: impl Into<FailPolicy>) -> Self {
        self.fail_on_object_is_default = policy.into();
        self
    }

    pub fn with_console_options(mut self, console_options: ConsoleOptions) -> Self {
        self.console_options = Some(console_options);
        self
    }

    #[deprecated(note = "use `with_console_options(ConsoleOptions::verbose())` instead")]
    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = Some(verbose);
        self
    }

    /// Console options to push for one call, with the legacy `verbose_logging`
    /// flag folded in.
    pub fn console_scope(&self) -> ConsoleOptions {
        let mut console = self.console_options.unwrap_or_default();
        if self.verbose_logging == Some(true) && !console.verbose {
            console.verbose = true;
        }
        console
    }
}

/// Policy resolved from [`LoadOptions`] for a single reconciliation
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub write_on_load: WriteOnLoad,
    pub fail_on_file_not_found: FailPolicy,
    pub fail_on_object_is_default: FailPolicy,
}

impl From<&LoadOptions> for Policy {
    fn from(options: &LoadOptions) -> Self {
        Self {
            write_on_load: options.write_on_load,
            fail_on_file_not_found: options.fail_on_file_not_found.clone(),
            fail_on_object_is_default: options.fail_on_object_is_default.clone(),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::from(&LoadOptions::default())
    }
}
