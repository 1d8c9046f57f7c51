//! Tabular view adapter: the façade consuming UI code calls.
//!
//! Accepts raw data plus optional field hints and returns a ready-to-render
//! [`TableView`]. Inherits totality from the normalization engine; nothing
//! here panics or returns an error. When `is_valid` is false the caller
//! must render an empty-state placeholder instead of a table.

use serde_json::Value;
use tabsafe_guard::ResilienceGuard;
use tabsafe_model::{SortOrder, TableView, ViewOptions};
use tabsafe_normalize::{infer_columns, is_valid_table_view, search, sort_rows, to_rows};

/// Build a complete view from an arbitrary raw value.
///
/// Pipeline: normalize, filter when a search term is set, sort when a sort
/// field is set, then take the caller's explicit columns or infer them from
/// the surviving rows.
pub fn build_view(raw: &Value, options: &ViewOptions) -> TableView {
    let mut rows = to_rows(raw);
    if !options.search_term.is_empty() {
        rows = search(&rows, &options.search_term, &[]);
    }
    if let Some(field) = &options.sort_field {
        rows = sort_rows(rows, field, options.sort_order);
    }
    let columns = match &options.explicit_columns {
        Some(explicit) => explicit.clone(),
        None => infer_columns(&rows),
    };
    let is_valid = is_valid_table_view(&rows);
    if !is_valid {
        tracing::debug!("view assembled without renderable rows");
    }
    TableView {
        total_count: rows.len(),
        page_size: options.page_size,
        rows,
        columns,
        is_valid,
    }
}

/// Re-filter an existing view. Columns are kept; validity and the count are
/// recomputed from the surviving rows.
pub fn search_view(view: &TableView, term: &str) -> TableView {
    let rows = search(&view.rows, term, &[]);
    TableView {
        total_count: rows.len(),
        page_size: view.page_size,
        is_valid: is_valid_table_view(&rows),
        columns: view.columns.clone(),
        rows,
    }
}

/// Re-sort an existing view by one of its fields.
pub fn sort_view(view: &TableView, field: &str, order: SortOrder) -> TableView {
    let rows = sort_rows(view.rows.clone(), field, order);
    TableView {
        total_count: rows.len(),
        page_size: view.page_size,
        is_valid: is_valid_table_view(&rows),
        columns: view.columns.clone(),
        rows,
    }
}

/// Non-blocking diagnostic banner for UI chrome: a one-line summary of what
/// the guard has suppressed so far, or `None` while the trail is clean.
/// Read-only; rendering decisions stay with the caller.
pub fn warning_banner(guard: &ResilienceGuard) -> Option<String> {
    let suppressed = guard.suppressed_count();
    if suppressed == 0 {
        return None;
    }
    let latest = guard
        .trace_snapshot()
        .last()
        .map(|trace| trace.offending.clone())
        .unwrap_or_default();
    Some(format!(
        "{suppressed} rendering fault(s) were suppressed; latest: {latest}"
    ))
}
