//! Row normalization: the single entry point turning an arbitrary value
//! into a uniform, renderable row list.
//!
//! Every branch degrades to a documented default instead of failing; the
//! whole point of this function is to be total over an open input domain.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tabsafe_model::{Anomaly, Kind, NormalizedRow, classify};

/// Normalize a raw value into rows. Null input yields an empty list; see
/// [`to_rows_or`] to substitute a caller-provided fallback instead.
///
/// Guarantees: the result is always a proper list, every row has an
/// identity, and identities are pairwise distinct within one call.
pub fn to_rows(raw: &Value) -> Vec<NormalizedRow> {
    to_rows_or(raw, Vec::new())
}

/// Normalize a raw value into rows, returning `fallback` when the input is
/// null.
pub fn to_rows_or(raw: &Value, fallback: Vec<NormalizedRow>) -> Vec<NormalizedRow> {
    match classify(raw) {
        Kind::List => {
            let elements = raw.as_array().map(Vec::as_slice).unwrap_or(&[]);
            normalize_list(elements)
        }
        Kind::Record => {
            let entries = raw.as_object();
            tracing::debug!(
                entries = entries.map_or(0, Map::len),
                "dictionary-shaped input normalized as key/value rows"
            );
            entries.map(normalize_record).unwrap_or_default()
        }
        Kind::Empty => fallback,
        Kind::Scalar => {
            tracing::debug!("scalar input wrapped as a single invalid row");
            vec![NormalizedRow::anomalous(
                "item_0",
                Anomaly::Invalid,
                wrap_value(raw),
            )]
        }
    }
}

fn normalize_list(elements: &[Value]) -> Vec<NormalizedRow> {
    let mut seen = HashSet::with_capacity(elements.len());
    let mut rows = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        let row = match classify(element) {
            Kind::Empty => NormalizedRow::anomalous(
                positional_identity(index),
                Anomaly::Empty,
                Map::new(),
            ),
            Kind::Record => {
                let fields = element
                    .as_object()
                    .cloned()
                    .unwrap_or_default();
                let identity = derived_identity(&fields)
                    .unwrap_or_else(|| positional_identity(index));
                NormalizedRow::record(identity, fields)
            }
            Kind::List | Kind::Scalar => NormalizedRow::anomalous(
                positional_identity(index),
                Anomaly::Primitive,
                wrap_value(element),
            ),
        };
        rows.push(disambiguate(row, index, &mut seen));
    }
    rows
}

fn normalize_record(entries: &Map<String, Value>) -> Vec<NormalizedRow> {
    entries
        .iter()
        .map(|(key, value)| {
            let mut fields = Map::new();
            fields.insert("key".to_string(), Value::String(key.clone()));
            fields.insert("value".to_string(), value.clone());
            NormalizedRow::anomalous(key.clone(), Anomaly::ObjectEntry, fields)
        })
        .collect()
}

/// Derive an identity from an existing `id` or `key` field; `id` wins.
fn derived_identity(fields: &Map<String, Value>) -> Option<String> {
    fields
        .get("id")
        .or_else(|| fields.get("key"))
        .and_then(identity_text)
}

fn identity_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn positional_identity(index: usize) -> String {
    format!("item_{index}")
}

/// Identity uniqueness is an invariant of one pass: when two elements carry
/// the same `id`/`key`, the later one gets its position appended.
fn disambiguate(
    mut row: NormalizedRow,
    index: usize,
    seen: &mut HashSet<String>,
) -> NormalizedRow {
    if seen.contains(&row.identity) {
        let mut suffix = index;
        loop {
            let candidate = format!("{}_{suffix}", row.identity);
            if !seen.contains(&candidate) {
                row.identity = candidate;
                break;
            }
            suffix += 1;
        }
    }
    seen.insert(row.identity.clone());
    row
}

fn wrap_value(value: &Value) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("value".to_string(), value.clone());
    fields
}
