//! Dynamically typed column values.
//!
//! A cursor fills one [`Value`] slot per column for every row it scans.
//! [`Value::Null`] is the absent value; every other variant is concrete.

use std::fmt;

/// A single scanned column value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// SQL `NULL`, the absent optional.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Character data.
    Text(String),
    /// Raw byte payload.
    Bytes(Vec<u8>),
    /// Array of strings (e.g. a `text[]` column).
    TextList(Vec<String>),
    /// Structured document (e.g. a `json`/`jsonb` column).
    Json(serde_json::Value),
}

/// Discriminant of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::UInt`]
    UInt,
    /// [`Value::Float`]
    Float,
    /// [`Value::Text`]
    Text,
    /// [`Value::Bytes`]
    Bytes,
    /// [`Value::TextList`]
    TextList,
    /// [`Value::Json`]
    Json,
}

impl ValueKind {
    /// Upper-case name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool => "BOOL",
            Self::Int => "INT",
            Self::UInt => "UINT",
            Self::Float => "FLOAT",
            Self::Text => "TEXT",
            Self::Bytes => "BYTES",
            Self::TextList => "TEXT[]",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::TextList(_) => ValueKind::TextList,
            Self::Json(_) => ValueKind::Json,
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::TextList(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A scanned value whose type does not fit the destination field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct Mismatch {
    /// Rust type the field expects.
    pub expected: &'static str,
    /// Description of the value that was scanned.
    pub found: String,
}

impl Mismatch {
    /// Mismatch on the value's kind.
    #[must_use]
    pub fn kind(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            found: value.kind().to_string(),
        }
    }

    /// Integer that does not fit the destination width.
    #[must_use]
    pub fn out_of_range(expected: &'static str, value: impl fmt::Display) -> Self {
        Self {
            expected,
            found: format!("out of range value {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        assert!(Value::default().is_null());
        assert_eq!(Value::default().kind(), ValueKind::Null);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_mismatch_display() {
        let m = Mismatch::kind("i64", &Value::Text("seven".into()));
        assert_eq!(m.to_string(), "expected i64, found TEXT");

        let m = Mismatch::out_of_range("i16", 70_000);
        assert_eq!(m.to_string(), "expected i16, found out of range value 70000");
    }
}
