//! Diagnostics
//!
//! Leveled messages produced while reconciling a settings file. A [`Diagnostics`]
//! context filters them through the active [`ConsoleOptions`] and hands them to a
//! [`DiagnosticSink`] in the order they were produced.
//!
//! Console options form a stack: every `load` call pushes its own options and the
//! returned [`Scope`] guard pops them again when it goes out of scope, whichever
//! way the call ends.

use crate::options::ConsoleOptions;
use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Receiver of diagnostics that passed the active console options
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Box<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` under the `json_loader` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let message = diagnostic.message;
        match diagnostic.level {
            Level::Debug => tracing::debug!(target: "json_loader", "{}", message),
            Level::Info => tracing::info!(target: "json_loader", "{}", message),
            Level::Warn => tracing::warn!(target: "json_loader", "{}", message),
            Level::Error => tracing::error!(target: "json_loader", "{}", message),
        }
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded diagnostics, oldest first.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    /// Messages recorded at exactly `level`, oldest first.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().push(diagnostic);
    }
}

/// Sink plus the stack of console options currently in effect
#[derive(Debug)]
pub struct Diagnostics<S> {
    sink: S,
    base: ConsoleOptions,
    stack: Vec<ConsoleOptions>,
}

impl<S> Diagnostics<S> {
    pub fn new(sink: S) -> Self {
        Self::with_base(sink, ConsoleOptions::default())
    }

    /// Use `base` whenever no options are pushed.
    pub fn with_base(sink: S, base: ConsoleOptions) -> Self {
        Self {
            sink,
            base,
            stack: Vec::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Options on top of the stack, or the base options when nothing was pushed.
    pub fn options(&self) -> ConsoleOptions {
        self.stack.last().copied().unwrap_or(self.base)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Make `options` active until the returned guard is dropped.
    pub fn push(&mut self, options: ConsoleOptions) -> Scope<'_, S> {
        self.stack.push(options);
        Scope { diagnostics: self }
    }

    fn pop(&mut self) {
        self.stack.pop();
    }
}

impl<S: DiagnosticSink> Diagnostics<S> {
    pub fn emit(&self, level: Level, message: impl Into<String>) {
        if self.options().allows(level) {
            self.sink.emit(Diagnostic::new(level, message));
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.emit(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Level::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(Level::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Level::Error, message);
    }
}

/// Guard returned by [`Diagnostics::push`]; pops the options on drop.
pub struct Scope<'a, S> {
    diagnostics: &'a mut Diagnostics<S>,
}

impl<S> Deref for Scope<'_, S> {
    type Target = Diagnostics<S>;

    fn deref(&self) -> &Diagnostics<S> {
        self.diagnostics
    }
}

impl<S> DerefMut for Scope<'_, S> {
    fn deref_mut(&mut self) -> &mut Diagnostics<S> {
        self.diagnostics
    }
}

impl<S> Drop for Scope<'_, S> {
    fn drop(&mut self) {
        self.diagnostics.pop();
    }
}
