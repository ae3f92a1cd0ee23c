// ABOUTME: Application-side field values and wire-ready SQL parameter values
// ABOUTME: Carries the explicit Absent marker and per-backend natural encoding

//! Value model for the write path.
//!
//! [`FieldValue`] is what application code hands to a record: loosely
//! typed, possibly absent, possibly raw JSON. [`SqlParam`] is what a
//! backend binds into a statement. The gap between the two (boolean
//! normalization, sentinel handling, backend-specific encoding) is
//! closed by [`crate::normalize`] and [`crate::writer`].

use crate::database_plugins::BackendKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A value assigned to a named column before normalization.
///
/// `Absent` is the canonical "no value supplied" marker. Callers coming
/// from looser data layers may still pass `Bool(false)` for unset
/// non-boolean fields; the write path reinterprets that sentinel as
/// `Absent` rather than writing a literal false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// No value supplied; binds as SQL NULL
    Absent,
    /// Logical boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// Double-precision float
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// UUID identifier
    Uuid(Uuid),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// Structured JSON payload (arrays and objects)
    Json(serde_json::Value),
}

impl FieldValue {
    /// Convert arbitrary application-supplied JSON into a field value.
    ///
    /// JSON `null` maps to `Absent`; numbers prefer the integer
    /// representation when lossless; arrays and objects stay structured.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(
                || Self::Float(n.as_f64().unwrap_or(0.0)),
                Self::Int,
            ),
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Json(other),
        }
    }

    /// Whether no value was supplied
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Generic truthiness used when no more specific rule applies.
    ///
    /// Absent, false, numeric zero, empty text, and empty JSON
    /// containers are falsy; everything else is truthy.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::Uuid(_) | Self::Timestamp(_) => true,
            Self::Json(v) => json_truthy(v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

fn json_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}

/// A value ready to be bound into a write statement.
///
/// Constructed fresh for every column on every write; never reused
/// across columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlParam {
    /// SQL NULL
    Null,
    /// Native boolean (strict-typing backends only)
    Bool(bool),
    /// Integer, including integer-encoded booleans
    Int(i64),
    /// Double-precision float
    Float(f64),
    /// Text
    Text(String),
    /// UUID
    Uuid(Uuid),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// JSON payload
    Json(serde_json::Value),
}

impl SqlParam {
    /// Natural encoding of a field value for a backend.
    ///
    /// Booleans become native booleans on a strict-typing backend and
    /// integer 1/0 everywhere else; all other variants map structurally.
    #[must_use]
    pub fn encode(value: &FieldValue, backend: BackendKind) -> Self {
        match value {
            FieldValue::Absent => Self::Null,
            FieldValue::Bool(b) => {
                if backend.strict_boolean_typing() {
                    Self::Bool(*b)
                } else {
                    Self::Int(i64::from(*b))
                }
            }
            FieldValue::Int(n) => Self::Int(*n),
            FieldValue::Float(f) => Self::Float(*f),
            FieldValue::Text(s) => Self::Text(s.clone()),
            FieldValue::Uuid(u) => Self::Uuid(*u),
            FieldValue::Timestamp(ts) => Self::Timestamp(*ts),
            FieldValue::Json(v) => Self::Json(v.clone()),
        }
    }

    /// Whether this parameter is SQL NULL
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_maps_null_to_absent() {
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Absent);
    }

    #[test]
    fn from_json_prefers_integer_representation() {
        assert_eq!(FieldValue::from_json(json!(7)), FieldValue::Int(7));
        assert_eq!(FieldValue::from_json(json!(2.5)), FieldValue::Float(2.5));
    }

    #[test]
    fn empty_json_containers_are_falsy() {
        assert!(!FieldValue::from_json(json!([])).truthy());
        assert!(!FieldValue::from_json(json!({})).truthy());
        assert!(FieldValue::from_json(json!(["x"])).truthy());
    }

    #[test]
    fn boolean_encoding_follows_backend_typing() {
        let yes = FieldValue::Bool(true);
        assert_eq!(
            SqlParam::encode(&yes, BackendKind::Sqlite),
            SqlParam::Int(1)
        );
        assert_eq!(
            SqlParam::encode(&yes, BackendKind::Postgres),
            SqlParam::Bool(true)
        );
    }

    #[test]
    fn absent_encodes_as_null_on_every_backend() {
        for backend in [BackendKind::Sqlite, BackendKind::Postgres] {
            assert_eq!(
                SqlParam::encode(&FieldValue::Absent, backend),
                SqlParam::Null
            );
        }
    }
}
