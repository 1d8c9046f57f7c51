//! Per-call configuration for building a table view.

use serde::{Deserialize, Serialize};

use crate::{ColumnDescriptor, SortOrder};

/// Default number of rows a consumer renders per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Options accepted by the view adapter. All fields have safe defaults;
/// `ViewOptions::default()` produces an unfiltered, unsorted view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Render hint for the consumer's pager; the adapter does not slice rows.
    pub page_size: usize,
    /// Case-insensitive substring filter. Empty means no filtering.
    pub search_term: String,
    /// Field to sort by. `None` preserves input order.
    pub sort_field: Option<String>,
    /// Direction applied when `sort_field` is set.
    pub sort_order: SortOrder,
    /// Caller-supplied columns; when `None` they are inferred from the rows.
    pub explicit_columns: Option<Vec<ColumnDescriptor>>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            sort_field: None,
            sort_order: SortOrder::Asc,
            explicit_columns: None,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.explicit_columns = Some(columns);
        self
    }
}
