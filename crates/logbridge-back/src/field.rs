//! Structured fields attached to entries and loggers.

use serde::Serialize;

/// A key/value pair attached to an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    kind: FieldKind,
}

/// What a [`Field`] carries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// An encoded value of any serializable type.
    Any(serde_json::Value),
    /// Opens a nested object; every later field on the same logger or entry
    /// lands inside it.
    Namespace,
    /// The value could not be serialized. Encoded as `"<key>Error"`.
    Invalid(String),
}

impl Field {
    /// Field holding any serializable value.
    ///
    /// The value is converted once, here. If conversion fails the field
    /// records the failure instead of the value.
    #[must_use]
    pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let kind = match serde_json::to_value(value) {
            Ok(value) => FieldKind::Any(value),
            Err(e) => FieldKind::Invalid(e.to_string()),
        };
        Self {
            key: key.into(),
            kind,
        }
    }

    /// String field.
    #[must_use]
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Any(serde_json::Value::String(value.into())),
        }
    }

    /// Integer field.
    #[must_use]
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Any(value.into()),
        }
    }

    /// Boolean field.
    #[must_use]
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Any(value.into()),
        }
    }

    /// Namespace marker: later fields nest under `key`.
    #[must_use]
    pub fn namespace(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Namespace,
        }
    }

    /// Field name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field payload.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }
}
