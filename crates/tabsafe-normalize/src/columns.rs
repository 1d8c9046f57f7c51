//! Column inference.
//!
//! Columns are a pure function of the first normalized row: a shape hint,
//! not a schema scan. Rows beyond the first never contribute columns; this
//! trades completeness for speed and predictability.

use tabsafe_model::{ColumnDescriptor, NormalizedRow};

/// Project the first row's own field names into column descriptors, in
/// field order. Returns an empty set when there are no rows or the first
/// row has no own fields.
pub fn infer_columns(rows: &[NormalizedRow]) -> Vec<ColumnDescriptor> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    first
        .fields
        .keys()
        .map(|key| ColumnDescriptor::for_key(key.as_str()))
        .collect()
}
