//! Normalization engine for the resilient tabular pipeline.
//!
//! Total, pure functions over arbitrary `serde_json::Value` input:
//! - **rows**: coerce any value into an ordered list of normalized rows
//! - **columns**: infer column descriptors from the first valid row
//! - **cells**: shared formatting and comparison rules for scalar cells
//! - **query**: safe search/sort primitives and the validity predicate
//!
//! Nothing in this crate returns an error or panics; every edge case
//! degrades to a documented default.

pub mod cells;
pub mod columns;
pub mod query;
pub mod rows;

pub use cells::{MISSING_PLACEHOLDER, coerce_text, compare_cells, format_cell};
pub use columns::infer_columns;
pub use query::{is_valid_table_view, search, sort_rows};
pub use rows::{to_rows, to_rows_or};
