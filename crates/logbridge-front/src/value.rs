//! Attribute values and key/value pairs.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value that can be attached to a log record.
///
/// Handlers never need type-specific logic: every variant serializes through
/// `serde`, so a back-end can encode it however it likes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// Point in time, rendered as RFC 3339.
    Time(DateTime<Utc>),
    /// Elapsed time, rendered as whole nanoseconds.
    Duration(Duration),
    /// Nested attributes.
    Group(Vec<Attr>),
    /// Arbitrary pre-built JSON.
    Any(serde_json::Value),
}

impl Value {
    /// Whether this value is a group with nothing to show: no members, or
    /// only members that are empty groups themselves.
    #[must_use]
    pub fn is_empty_group(&self) -> bool {
        match self {
            Self::Group(attrs) => attrs.iter().all(|attr| attr.value.is_empty_group()),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Uint(v) => serializer.serialize_u64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Time(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            },
            Self::Duration(v) => {
                serializer.serialize_u64(u64::try_from(v.as_nanos()).unwrap_or(u64::MAX))
            },
            Self::Group(attrs) => {
                let mut map = serializer.serialize_map(Some(attrs.len()))?;
                for attr in attrs {
                    map.serialize_entry(&attr.key, &attr.value)?;
                }
                map.end()
            },
            Self::Any(v) => v.serialize(serializer),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
    DateTime<Utc> => Time,
    Duration => Duration,
    serde_json::Value => Any,
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Uint(u64::try_from(v).unwrap_or(u64::MAX))
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Self::Group(attrs)
    }
}

/// A key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// Attribute name.
    pub key: String,
    /// Attribute value.
    pub value: Value,
}

impl Attr {
    /// Create an attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a group attribute holding `attrs`.
    #[must_use]
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(attrs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(1), Value::Int(1));
        assert_eq!(Value::from(7_u32), Value::Uint(7));
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serde_json::to_string(&Value::Int(-3)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&Value::from("hi")).unwrap(), "\"hi\"");
        assert_eq!(
            serde_json::to_string(&Value::Duration(Duration::from_millis(2))).unwrap(),
            "2000000"
        );
    }

    #[test]
    fn test_serialize_group_preserves_order() {
        let value = Value::Group(vec![Attr::new("z", 1), Attr::new("a", "two")]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":1,"a":"two"}"#);
    }

    #[test]
    fn test_is_empty_group() {
        assert!(Value::Group(Vec::new()).is_empty_group());
        let hollow = Attr::group("outer", vec![Attr::group("inner", Vec::new())]);
        assert!(hollow.value.is_empty_group());
        let full = Attr::group("outer", vec![Attr::new("n", 0)]);
        assert!(!full.value.is_empty_group());
        assert!(!Value::Int(0).is_empty_group());
    }
}
