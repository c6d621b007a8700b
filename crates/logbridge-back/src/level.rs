//! Severity levels and the shared, adjustable threshold.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI8, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log entry.
///
/// The three levels above [`Level::Error`] change control flow after the
/// entry is written: `DPanic` panics in development mode, `Panic` always
/// panics, `Fatal` exits the process.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    Debug = -1,
    /// Default priority.
    #[default]
    Info = 0,
    /// More important than info, no human needs to look yet.
    Warn = 1,
    /// High priority. A running application should not produce these.
    Error = 2,
    /// Particularly important error. Panics after writing in development.
    DPanic = 3,
    /// Panics after writing.
    Panic = 4,
    /// Exits the process after writing.
    Fatal = 5,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Uppercase name.
    #[must_use]
    pub const fn capital_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::DPanic => "DPANIC",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Whether an entry at `level` passes a threshold of `self`.
    #[must_use]
    pub fn enabled(self, level: Level) -> bool {
        level >= self
    }

    fn from_repr(raw: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| *level as i8 == raw)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// A threshold that can be changed at runtime.
///
/// Clones share the same value, so every core built from one `AtomicLevel`
/// observes a change immediately.
#[derive(Debug, Clone)]
pub struct AtomicLevel(Arc<AtomicI8>);

impl AtomicLevel {
    /// Create a threshold starting at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self(Arc::new(AtomicI8::new(level as i8)))
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        // Only valid discriminants are ever stored.
        Level::from_repr(self.0.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Change the threshold.
    pub fn set_level(&self, level: Level) {
        self.0.store(level as i8, Ordering::Relaxed);
    }

    /// Whether an entry at `level` passes the current threshold.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.level().enabled(level)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}
