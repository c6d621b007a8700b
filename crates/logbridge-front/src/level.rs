//! Front-end severity scale.

use std::fmt;

/// Importance of a log record.
///
/// The scale is an open integer continuum: the four named levels are spaced
/// four apart so that intermediate and out-of-range values stay meaningful.
/// Higher values are more severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// Diagnostic detail.
    pub const DEBUG: Self = Self(-4);
    /// Routine information (the baseline).
    pub const INFO: Self = Self(0);
    /// Something unexpected but recoverable.
    pub const WARN: Self = Self(4);
    /// An operation failed.
    pub const ERROR: Self = Self(8);
    /// The most severe representable level.
    pub const MAX: Self = Self(i32::MAX);
    /// The least severe representable level.
    pub const MIN: Self = Self(i32::MIN);

    /// Create a level from its raw value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Level `delta` steps away from this one, saturating at the bounds.
    #[must_use]
    pub const fn offset(self, delta: i32) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Level {
    /// Renders the nearest lower named level, followed by the signed
    /// distance from it when non-zero (`ERROR+4`, `DEBUG-2`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if *self < Self::INFO {
            ("DEBUG", Self::DEBUG)
        } else if *self < Self::WARN {
            ("INFO", Self::INFO)
        } else if *self < Self::ERROR {
            ("WARN", Self::WARN)
        } else {
            ("ERROR", Self::ERROR)
        };
        let delta = i64::from(self.0).saturating_sub(i64::from(base.0));
        if delta == 0 {
            f.write_str(name)
        } else {
            write!(f, "{name}{delta:+}")
        }
    }
}
