//! Log entries and their call-site metadata.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Utc};

use crate::level::Level;

/// Where an entry was logged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryCaller {
    /// Source file path.
    pub file: &'static str,
    /// Line number.
    pub line: u32,
}

impl EntryCaller {
    /// Caller from a captured source location.
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }

    /// `file:line` with the file trimmed to its last directory and name.
    #[must_use]
    pub fn trimmed_path(&self) -> String {
        format!("{}:{}", trim_file(self.file), self.line)
    }
}

impl fmt::Display for EntryCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

fn trim_file(file: &str) -> &str {
    let Some(last) = file.rfind(['/', '\\']) else {
        return file;
    };
    match file[..last].rfind(['/', '\\']) {
        Some(prev) => &file[prev.saturating_add(1)..],
        None => file,
    }
}

/// A log entry: everything except its structured fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Severity.
    pub level: Level,
    /// When the event happened.
    pub time: DateTime<Utc>,
    /// Log message.
    pub message: String,
    /// Call site, if attached.
    pub caller: Option<EntryCaller>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_path() {
        let caller = EntryCaller {
            file: "crates/logbridge/src/handler.rs",
            line: 42,
        };
        assert_eq!(caller.trimmed_path(), "src/handler.rs:42");
        assert_eq!(caller.to_string(), "crates/logbridge/src/handler.rs:42");

        let caller = EntryCaller {
            file: "main.rs",
            line: 1,
        };
        assert_eq!(caller.trimmed_path(), "main.rs:1");

        let caller = EntryCaller {
            file: "src/main.rs",
            line: 1,
        };
        assert_eq!(caller.trimmed_path(), "src/main.rs:1");
    }

    #[test]
    fn test_from_location() {
        let caller = EntryCaller::from_location(Location::caller());
        assert_eq!(caller.file, file!());
    }
}
