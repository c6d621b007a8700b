//! The logging facade.

use std::panic::Location;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::handler::{HandleResult, Handler};
use crate::level::Level;
use crate::record::Record;
use crate::value::Attr;

/// Front door for structured logging.
///
/// A logger holds exactly one [`Handler`] and forwards records to it. It is
/// cheap to clone; clones share the handler.
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    /// Create a logger backed by `handler`.
    #[must_use]
    pub fn new(handler: impl Handler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Create a logger from an already shared handler.
    #[must_use]
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// The handler records are sent to.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records carry `attrs`.
    #[must_use]
    pub fn with(&self, attrs: &[Attr]) -> Self {
        Self {
            handler: Arc::clone(&self.handler).with_attrs(attrs),
        }
    }

    /// Logger whose later attributes are nested under `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self {
            handler: Arc::clone(&self.handler).with_group(name),
        }
    }

    /// Whether records at `level` would be handled.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Emit a record, returning the handler's error if any.
    ///
    /// # Errors
    ///
    /// Returns whatever the handler reports when it fails to write.
    #[track_caller]
    pub fn try_log(&self, level: Level, message: &str, attrs: &[Attr]) -> HandleResult<()> {
        if !self.handler.enabled(level) {
            return Ok(());
        }
        let mut record = Record::new(Utc::now(), level, message, Some(Location::caller()));
        record.add_attrs(attrs);
        self.handler.handle(&record)
    }

    /// Emit a record. Handler failures are reported through `tracing`.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, attrs: &[Attr]) {
        if let Err(e) = self.try_log(level, message, attrs) {
            warn!(level = %level, error = %e, "Log handler failed to write record");
        }
    }

    /// Log at [`Level::DEBUG`].
    #[track_caller]
    pub fn debug(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::DEBUG, message, attrs);
    }

    /// Log at [`Level::INFO`].
    #[track_caller]
    pub fn info(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::INFO, message, attrs);
    }

    /// Log at [`Level::WARN`].
    #[track_caller]
    pub fn warn(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::WARN, message, attrs);
    }

    /// Log at [`Level::ERROR`].
    #[track_caller]
    pub fn error(&self, message: &str, attrs: &[Attr]) {
        self.log(Level::ERROR, message, attrs);
    }
}
