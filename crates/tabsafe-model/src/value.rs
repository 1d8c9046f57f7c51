//! Shape classification for untrusted input values.
//!
//! Every other component switches on [`Kind`] instead of probing
//! `serde_json::Value` variants inline. This keeps the "is it list-like,
//! is it record-like" decision in exactly one place.

use serde_json::Value;

/// The shape of an arbitrary runtime value, as far as tabular rendering
/// is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Ordered, integer-indexed elements with a length.
    List,
    /// Named, enumerable own properties, not list-like.
    Record,
    /// A bare scalar (string, number, boolean).
    Scalar,
    /// Null; the absent value.
    Empty,
}

/// Classify a raw value into its [`Kind`].
pub fn classify(raw: &Value) -> Kind {
    match raw {
        Value::Array(_) => Kind::List,
        Value::Object(_) => Kind::Record,
        Value::Null => Kind::Empty,
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Kind::Scalar,
    }
}
