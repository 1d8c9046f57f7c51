//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::Context;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde_json::{Value, json};

use tabsafe_cli::render::{count_summary, render_view};
use tabsafe_guard::{ResilienceGuard, SimHost};
use tabsafe_model::{ColumnDescriptor, SortOrder, TableView, ViewOptions};
use tabsafe_normalize::{infer_columns, is_valid_table_view};
use tabsafe_view::{build_view, warning_banner};

use crate::cli::{DemoArgs, SortOrderArg, ViewArgs};

pub fn run_view(args: &ViewArgs) -> anyhow::Result<()> {
    let raw = load_json(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let options = view_options(args);
    let view = build_view(&raw, &options);
    println!("{}", render_view(&view));
    println!("{}", count_summary(&view));
    Ok(())
}

/// Walk a simulated host through fault injection, suppression, and repair,
/// then show the diagnostic trail and the repaired view.
pub fn run_demo(args: &DemoArgs) -> anyhow::Result<()> {
    let mut host = SimHost::new();
    let guard = ResilienceGuard::new();
    guard.install(&mut host);
    host.add_table(
        "orders",
        json!({"pending": 2, "shipped": 14, "cancelled": 1}),
    );

    for _ in 0..args.faults {
        host.emit_uncaught_error(
            "TypeError: rawData.some is not a function",
            "orders payload was a dictionary",
        );
    }
    // One fault through the primitive shim instead of the error channel.
    let _ = host.ops().any(&json!(null), &|_| true);

    host.run_ticks(args.ticks);

    println!("Faults suppressed: {}", guard.suppressed_count());
    println!("Repair passes run: {}", guard.repairs_run());
    if let Some(banner) = warning_banner(&guard) {
        println!("Banner: {banner}");
    }
    println!();
    println!("{}", trace_table(&guard));

    if let Some(rows) = host.table_rows("orders") {
        let is_valid = is_valid_table_view(&rows);
        let columns = infer_columns(&rows);
        let total_count = rows.len();
        let view = TableView {
            rows,
            columns,
            total_count,
            page_size: 10,
            is_valid,
        };
        println!();
        println!("Repaired view of 'orders':");
        println!("{}", render_view(&view));
    }
    Ok(())
}

fn load_json(path: &Path) -> tabsafe_model::Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn view_options(args: &ViewArgs) -> ViewOptions {
    let mut options = ViewOptions::new();
    options.page_size = args.page_size.max(1);
    if let Some(term) = &args.search {
        options.search_term = term.clone();
    }
    options.sort_field = args.sort_field.clone();
    options.sort_order = match args.order {
        SortOrderArg::Asc => SortOrder::Asc,
        SortOrderArg::Desc => SortOrder::Desc,
    };
    if !args.columns.is_empty() {
        options.explicit_columns = Some(
            args.columns
                .iter()
                .map(|key| ColumnDescriptor::for_key(key.as_str()))
                .collect(),
        );
    }
    options
}

fn trace_table(guard: &ResilienceGuard) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("When").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Offending").add_attribute(Attribute::Bold),
    ]);
    for trace in guard.trace_snapshot() {
        table.add_row(vec![
            Cell::new(trace.when.format("%H:%M:%S%.3f").to_string()),
            Cell::new(format!("{:?}", trace.kind)),
            Cell::new(truncate(&trace.offending, 72)),
        ]);
    }
    table
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let head: String = text.chars().take(limit).collect();
        format!("{head}…")
    }
}
