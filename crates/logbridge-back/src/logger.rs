//! The logger handle and checked entries.

use std::panic::Location;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::engine::Core;
use crate::entry::{Entry, EntryCaller};
use crate::error::BackendResult;
use crate::field::Field;
use crate::level::Level;

/// What happens after an entry has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterWrite {
    Nothing,
    Panic,
    Exit,
}

/// A structured logger.
///
/// Cheap to clone. [`Logger::with`] returns a child that shares the parent's
/// output and adds fields; the parent is never modified.
#[derive(Debug, Clone)]
pub struct Logger {
    core: Arc<dyn Core>,
    development: bool,
    add_caller: bool,
}

impl Logger {
    /// Create a logger over `core`.
    #[must_use]
    pub fn new(core: impl Core + 'static) -> Self {
        Self::from_core(Arc::new(core))
    }

    /// Create a logger over a shared core.
    #[must_use]
    pub fn from_core(core: Arc<dyn Core>) -> Self {
        Self {
            core,
            development: false,
            add_caller: false,
        }
    }

    /// Toggle development mode, in which `DPanic` entries panic.
    #[must_use]
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Toggle attaching the call site to entries from the direct API.
    #[must_use]
    pub fn with_caller(mut self, add_caller: bool) -> Self {
        self.add_caller = add_caller;
        self
    }

    /// The core this logger writes through.
    #[must_use]
    pub fn core(&self) -> &Arc<dyn Core> {
        &self.core
    }

    /// Current threshold of the core.
    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level()
    }

    /// Whether development mode is on.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Child logger that adds `fields` to every entry.
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        Self {
            core: self.core.with(fields),
            ..self.clone()
        }
    }

    /// Check whether an entry at `level` would be written.
    ///
    /// Returns `None` when there is nothing to do, so callers can skip
    /// building fields. `Panic` and `Fatal` entries, and `DPanic` entries in
    /// development mode, come back even when the core is disabled, because
    /// writing them still has to panic or exit.
    #[must_use]
    pub fn check(&self, level: Level, message: &str) -> Option<CheckedEntry> {
        let after = match level {
            Level::DPanic if self.development => AfterWrite::Panic,
            Level::Panic => AfterWrite::Panic,
            Level::Fatal => AfterWrite::Exit,
            _ => AfterWrite::Nothing,
        };
        let core = self
            .core
            .enabled(level)
            .then(|| Arc::clone(&self.core));
        if core.is_none() && after == AfterWrite::Nothing {
            return None;
        }
        Some(CheckedEntry {
            entry: Entry {
                level,
                time: Utc::now(),
                message: message.to_string(),
                caller: None,
            },
            core,
            after,
        })
    }

    /// Log a message with fields. Write failures are reported through
    /// `tracing`.
    ///
    /// # Panics
    ///
    /// Panics after writing at `Panic`, or at `DPanic` in development mode.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        let Some(mut entry) = self.check(level, message) else {
            return;
        };
        if self.add_caller {
            entry.set_caller(EntryCaller::from_location(Location::caller()));
        }
        if let Err(e) = entry.write(fields) {
            warn!(level = %level, error = %e, "Failed to write log entry");
        }
    }

    /// Log at debug.
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    /// Log at info.
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    /// Log at warn.
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    /// Log at error.
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Log at dpanic.
    ///
    /// # Panics
    ///
    /// Panics after writing in development mode.
    #[track_caller]
    pub fn dpanic(&self, message: &str, fields: &[Field]) {
        self.log(Level::DPanic, message, fields);
    }

    /// Log at panic, then panic.
    ///
    /// # Panics
    ///
    /// Always, after writing.
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.log(Level::Panic, message, fields);
    }

    /// Log at fatal, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
    }

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    pub fn sync(&self) -> BackendResult<()> {
        self.core.sync()
    }
}

/// An entry that passed [`Logger::check`] and is waiting for its fields.
#[derive(Debug)]
pub struct CheckedEntry {
    entry: Entry,
    core: Option<Arc<dyn Core>>,
    after: AfterWrite,
}

impl CheckedEntry {
    /// The pending entry.
    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Override the timestamp.
    pub fn set_time(&mut self, time: DateTime<Utc>) {
        self.entry.time = time;
    }

    /// Attach a call site.
    pub fn set_caller(&mut self, caller: EntryCaller) {
        self.entry.caller = Some(caller);
    }

    /// Write the entry with `fields`, then run its terminal action.
    ///
    /// # Errors
    ///
    /// Returns the core's error if encoding or writing failed.
    ///
    /// # Panics
    ///
    /// Panics after writing when the entry's level requires it.
    pub fn write(self, fields: &[Field]) -> BackendResult<()> {
        let result = match &self.core {
            Some(core) => core.write(&self.entry, fields),
            None => Ok(()),
        };
        match self.after {
            AfterWrite::Nothing => result,
            AfterWrite::Panic => panic!("{}", self.entry.message),
            AfterWrite::Exit => std::process::exit(1),
        }
    }
}
