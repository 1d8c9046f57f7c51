use serde_json::{Map, Value};

/// How a source element deviated from a plain record shape.
///
/// Downstream rendering uses this to flag or special-case the row instead
/// of failing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anomaly {
    /// The element was null or absent.
    Empty,
    /// The element was a bare scalar; its value lives under the `value` field.
    Primitive,
    /// The row was synthesized from one key/value pair of a dictionary-shaped
    /// input; fields are `{key, value}`.
    ObjectEntry,
    /// The whole input was a scalar where a collection was expected.
    Invalid,
}

/// One uniform row produced by a normalization pass.
///
/// Created fresh on every pass; no identity persists across calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedRow {
    /// Stable key, unique within one normalization pass. Derived from an
    /// existing `id`/`key` field when present, else positional
    /// (`"item_<index>"`).
    pub identity: String,
    /// The source element's own key/value pairs when it was record-like;
    /// a placeholder mapping otherwise.
    pub fields: Map<String, Value>,
    /// Set when the source element was not a plain record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
}

impl NormalizedRow {
    /// A clean row built from a record-like element.
    pub fn record(identity: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            identity: identity.into(),
            fields,
            anomaly: None,
        }
    }

    /// A row flagged with an anomaly tag.
    pub fn anomalous(
        identity: impl Into<String>,
        anomaly: Anomaly,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            identity: identity.into(),
            fields,
            anomaly: Some(anomaly),
        }
    }

    /// Look up one field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// True when the row came from a clean record-like element. Any tagged
    /// row, dictionary entries included, is displaced to the end by sorting.
    pub fn is_plain(&self) -> bool {
        self.anomaly.is_none()
    }
}
