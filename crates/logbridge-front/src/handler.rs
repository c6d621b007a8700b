//! The handler contract that sits behind a [`Logger`](crate::Logger).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::level::Level;
use crate::record::Record;
use crate::value::Attr;

/// Error returned by a handler that failed to write a record.
///
/// Boxed so handlers can surface their own error types untouched; callers
/// may downcast to the concrete type.
pub type HandleError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for handler operations.
pub type HandleResult<T> = Result<T, HandleError>;

/// Processes log records produced by a [`Logger`](crate::Logger).
///
/// Handlers are immutable once built. `with_attrs` and `with_group` return
/// a new handler and leave the receiver untouched, so a handler can be shared
/// across threads and derived from concurrently.
pub trait Handler: Any + Send + Sync + fmt::Debug {
    /// Whether records at `level` would be handled.
    ///
    /// The logger calls this before building a record; returning `false`
    /// skips all formatting work.
    fn enabled(&self, level: Level) -> bool;

    /// Handle a record.
    ///
    /// # Errors
    ///
    /// Returns the underlying writer's error if the record could not be
    /// written.
    fn handle(&self, record: &Record) -> HandleResult<()>;

    /// Handler that adds `attrs` to every record.
    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Handler that nests every later attribute under `name`.
    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler>;
}
