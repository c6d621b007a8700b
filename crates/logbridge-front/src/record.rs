//! Log records.

use std::panic::Location;

use chrono::{DateTime, Utc};

use crate::level::Level;
use crate::value::Attr;

/// A single log event on its way to a handler.
#[derive(Debug, Clone)]
pub struct Record {
    time: DateTime<Utc>,
    level: Level,
    message: String,
    location: Option<&'static Location<'static>>,
    attrs: Vec<Attr>,
}

impl Record {
    /// Create a record with no attributes.
    ///
    /// `location` is the call site that produced the record, if known.
    #[must_use]
    pub fn new(
        time: DateTime<Utc>,
        level: Level,
        message: impl Into<String>,
        location: Option<&'static Location<'static>>,
    ) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            location,
            attrs: Vec::new(),
        }
    }

    /// When the event happened.
    #[must_use]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Severity of the event.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Log message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Captured call site.
    #[must_use]
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// Number of attributes on the record.
    #[must_use]
    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }

    /// Append attributes.
    pub fn add_attrs(&mut self, attrs: &[Attr]) {
        self.attrs.extend_from_slice(attrs);
    }

    /// Visit attributes in order until `f` returns `false`.
    pub fn attrs(&self, mut f: impl FnMut(&Attr) -> bool) {
        for attr in &self.attrs {
            if !f(attr) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_stop_early() {
        let mut record = Record::new(Utc::now(), Level::INFO, "msg", None);
        record.add_attrs(&[Attr::new("a", 1), Attr::new("b", 2), Attr::new("c", 3)]);
        assert_eq!(record.num_attrs(), 3);

        let mut seen = Vec::new();
        record.attrs(|attr| {
            seen.push(attr.key.clone());
            attr.key != "b"
        });
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_accessors() {
        let location = Location::caller();
        let record = Record::new(Utc::now(), Level::WARN, "careful", Some(location));
        assert_eq!(record.level(), Level::WARN);
        assert_eq!(record.message(), "careful");
        assert_eq!(record.location().map(Location::file), Some(file!()));
        assert_eq!(record.num_attrs(), 0);
    }
}
