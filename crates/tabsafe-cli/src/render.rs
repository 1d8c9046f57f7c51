//! Terminal rendering of assembled table views.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use tabsafe_model::{Anomaly, NormalizedRow, TableView};
use tabsafe_normalize::{MISSING_PLACEHOLDER, format_cell};

/// Shown instead of a table when the view is not renderable.
pub const EMPTY_STATE_MESSAGE: &str = "No displayable data.";

/// Render a view as a terminal table, honoring its `page_size` hint.
/// Invalid views render the empty-state message instead.
pub fn render_view(view: &TableView) -> String {
    if !view.is_valid {
        return EMPTY_STATE_MESSAGE.to_string();
    }
    let page: Vec<&NormalizedRow> = view.rows.iter().take(view.page_size).collect();
    let flag_anomalies = page.iter().any(|row| needs_flag(row));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header: Vec<Cell> = view
        .columns
        .iter()
        .map(|column| header_cell(&column.label))
        .collect();
    if flag_anomalies {
        header.push(header_cell("Note"));
    }
    table.set_header(header);

    for row in &page {
        let mut cells: Vec<Cell> = view
            .columns
            .iter()
            .map(|column| {
                let text = row
                    .field(&column.key)
                    .map(format_cell)
                    .unwrap_or_else(|| MISSING_PLACEHOLDER.to_string());
                Cell::new(text)
            })
            .collect();
        if flag_anomalies {
            cells.push(Cell::new(anomaly_note(row)));
        }
        table.add_row(cells);
    }
    table.to_string()
}

/// One-line count summary printed under the table.
pub fn count_summary(view: &TableView) -> String {
    let shown = view.rows.len().min(view.page_size);
    if shown < view.total_count {
        format!("{shown} of {} row(s) shown", view.total_count)
    } else {
        format!("{} row(s)", view.total_count)
    }
}

fn needs_flag(row: &NormalizedRow) -> bool {
    matches!(
        row.anomaly,
        Some(Anomaly::Empty | Anomaly::Primitive | Anomaly::Invalid)
    )
}

fn anomaly_note(row: &NormalizedRow) -> &'static str {
    match row.anomaly {
        Some(Anomaly::Empty) => "empty",
        Some(Anomaly::Primitive) => "primitive",
        Some(Anomaly::Invalid) => "invalid",
        Some(Anomaly::ObjectEntry) | None => "",
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tabsafe_model::ViewOptions;
    use tabsafe_view::build_view;

    #[test]
    fn invalid_view_renders_empty_state() {
        let view = build_view(&json!(null), &ViewOptions::default());
        assert_eq!(render_view(&view), EMPTY_STATE_MESSAGE);
    }

    #[test]
    fn valid_view_renders_labels_and_cells() {
        let view = build_view(&json!([{"id": 1, "name": "Widget"}]), &ViewOptions::default());
        let rendered = render_view(&view);
        assert!(rendered.contains("Id"));
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Widget"));
        assert_eq!(count_summary(&view), "1 row(s)");
    }

    #[test]
    fn anomalous_rows_get_a_note_column() {
        let view = build_view(&json!([{"id": 1}, null]), &ViewOptions::default());
        let rendered = render_view(&view);
        assert!(rendered.contains("Note"));
        assert!(rendered.contains("empty"));
    }

    #[test]
    fn page_size_limits_rendered_rows() {
        let raw = json!([
            {"n": 1}, {"n": 2}, {"n": 3}
        ]);
        let mut options = ViewOptions::default();
        options.page_size = 2;
        let view = build_view(&raw, &options);
        assert_eq!(count_summary(&view), "2 of 3 row(s) shown");
    }
}
