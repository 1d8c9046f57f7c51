use serde::{Deserialize, Serialize};

/// Sort direction for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A renderable column, inferred from the first valid row of a pass.
///
/// The comparator and formatter rules are uniform across columns and live in
/// the normalization engine; the descriptor itself is pure data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Field name this column reads from each row.
    pub key: String,
    /// Display label: the key with its first letter capitalized.
    pub label: String,
}

impl ColumnDescriptor {
    /// Build a descriptor for one field name, deriving the label.
    pub fn for_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = capitalize(&key);
        Self { key, label }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
