//! Safe search and sort primitives over normalized rows.

use std::cmp::Ordering;

use serde_json::Value;
use tabsafe_model::{NormalizedRow, SortOrder};

use crate::cells::{coerce_text, compare_cells};

/// Case-insensitive substring filter.
///
/// An empty term returns the rows unchanged. With an empty `fields` slice
/// every own field of a row is a candidate; otherwise only the named fields
/// are. A row matches when any candidate's string coercion contains the
/// folded term. The result preserves input order and is always a sub-list
/// of the input.
pub fn search(rows: &[NormalizedRow], term: &str, fields: &[String]) -> Vec<NormalizedRow> {
    if term.is_empty() {
        return rows.to_vec();
    }
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row_matches(row, &needle, fields))
        .cloned()
        .collect()
}

fn row_matches(row: &NormalizedRow, needle: &str, fields: &[String]) -> bool {
    if fields.is_empty() {
        row.fields.values().any(|value| value_matches(value, needle))
    } else {
        fields
            .iter()
            .filter_map(|name| row.field(name))
            .any(|value| value_matches(value, needle))
    }
}

fn value_matches(value: &Value, needle: &str) -> bool {
    coerce_text(value).to_lowercase().contains(needle)
}

/// Stable sort by the named field, numeric-aware.
///
/// Missing values sort last regardless of direction, and every tagged row
/// sorts after the clean records, keeping its relative input order.
pub fn sort_rows(mut rows: Vec<NormalizedRow>, field: &str, order: SortOrder) -> Vec<NormalizedRow> {
    rows.sort_by(|a, b| match (a.is_plain(), b.is_plain()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
        (true, true) => compare_field(a.field(field), b.field(field), order),
    });
    rows
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    match (present(a), present(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => {
            let ordering = compare_cells(left, right);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// The single predicate deciding table vs. empty-state rendering: true iff
/// there is at least one row and the first row has at least one own field.
pub fn is_valid_table_view(rows: &[NormalizedRow]) -> bool {
    rows.first().is_some_and(|row| !row.fields.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tabsafe_model::Anomaly;

    fn row(identity: &str, pairs: &[(&str, serde_json::Value)]) -> NormalizedRow {
        let fields = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        NormalizedRow::record(identity, fields)
    }

    #[test]
    fn empty_term_returns_all_rows() {
        let rows = vec![row("1", &[("name", json!("a"))])];
        assert_eq!(search(&rows, "", &[]).len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_and_order_preserving() {
        let rows = vec![
            row("1", &[("name", json!("Alice"))]),
            row("2", &[("name", json!("Bob"))]),
            row("3", &[("name", json!("MALICE"))]),
        ];
        let hits = search(&rows, "ali", &[]);
        let ids: Vec<&str> = hits.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn search_restricted_to_named_fields() {
        let rows = vec![row("1", &[("name", json!("abc")), ("note", json!("xyz"))])];
        assert!(search(&rows, "xyz", &["name".to_string()]).is_empty());
        assert_eq!(search(&rows, "xyz", &["note".to_string()]).len(), 1);
    }

    #[test]
    fn null_fields_never_match() {
        let rows = vec![row("1", &[("name", json!(null))])];
        assert!(search(&rows, "null", &[]).is_empty());
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let rows = vec![
            row("a", &[("v", json!(2))]),
            row("b", &[("v", json!(1))]),
            row("c", &[("v", json!(1))]),
        ];
        let sorted = sort_rows(rows, "v", SortOrder::Asc);
        let ids: Vec<&str> = sorted.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let rows = vec![
            row("hole", &[("v", json!(null))]),
            row("low", &[("v", json!(1))]),
            row("high", &[("v", json!(9))]),
        ];
        let asc = sort_rows(rows.clone(), "v", SortOrder::Asc);
        let ids: Vec<&str> = asc.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["low", "high", "hole"]);

        let desc = sort_rows(rows, "v", SortOrder::Desc);
        let ids: Vec<&str> = desc.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["high", "low", "hole"]);
    }

    #[test]
    fn displaced_rows_keep_relative_order_at_the_end() {
        let first_hole =
            NormalizedRow::anomalous("item_0", Anomaly::Empty, serde_json::Map::new());
        let second_hole =
            NormalizedRow::anomalous("item_2", Anomaly::Empty, serde_json::Map::new());
        let rows = vec![
            first_hole.clone(),
            row("z", &[("v", json!(5))]),
            second_hole.clone(),
            row("a", &[("v", json!(1))]),
        ];
        let sorted = sort_rows(rows, "v", SortOrder::Asc);
        let ids: Vec<&str> = sorted.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["a", "z", "item_0", "item_2"]);
    }

    #[test]
    fn validity_predicate() {
        assert!(!is_valid_table_view(&[]));
        assert!(is_valid_table_view(&[row("1", &[("id", json!(1))])]));
        let bare = NormalizedRow::anomalous("item_0", Anomaly::Empty, serde_json::Map::new());
        assert!(!is_valid_table_view(&[bare]));
    }
}
