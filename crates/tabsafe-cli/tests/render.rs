//! Integration tests for the render module.

use serde_json::json;
use tabsafe_cli::render::{EMPTY_STATE_MESSAGE, count_summary, render_view};
use tabsafe_model::{SortOrder, ViewOptions};
use tabsafe_view::build_view;

#[test]
fn full_pipeline_renders_sorted_page() {
    let raw = json!([
        {"id": 1, "name": "Widget", "stock": 12},
        {"id": 2, "name": "Gadget", "stock": 3},
        {"id": 3, "name": "Gizmo", "stock": 7},
    ]);
    let options = ViewOptions::new().with_sort("stock", SortOrder::Desc);
    let view = build_view(&raw, &options);
    let rendered = render_view(&view);

    let widget_at = rendered.find("Widget").expect("widget rendered");
    let gadget_at = rendered.find("Gadget").expect("gadget rendered");
    assert!(widget_at < gadget_at, "descending stock puts Widget first");
    assert_eq!(count_summary(&view), "3 row(s)");
}

#[test]
fn dictionary_payload_renders_key_value_table() {
    let view = build_view(&json!({"pending": 2, "done": 5}), &ViewOptions::default());
    let rendered = render_view(&view);
    assert!(rendered.contains("Key"));
    assert!(rendered.contains("Value"));
    assert!(rendered.contains("pending"));
}

#[test]
fn hostile_payload_degrades_to_empty_state() {
    let view = build_view(&json!(null), &ViewOptions::default());
    assert_eq!(render_view(&view), EMPTY_STATE_MESSAGE);

    let scalar_view = build_view(&json!(17), &ViewOptions::default());
    // A bare scalar still yields a one-row flagged view, not a failure.
    assert!(scalar_view.is_valid);
    assert!(render_view(&scalar_view).contains("17"));
}
