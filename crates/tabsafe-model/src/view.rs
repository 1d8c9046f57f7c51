use serde::{Deserialize, Serialize};

use crate::{ColumnDescriptor, NormalizedRow};

/// A ready-to-render tabular view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    pub rows: Vec<NormalizedRow>,
    pub columns: Vec<ColumnDescriptor>,
    /// Row count after search and sort were applied.
    pub total_count: usize,
    /// Render hint carried through from the options.
    pub page_size: usize,
    /// False when there are no rows or the first row has no own fields.
    /// Consumers must render an empty state instead of a table then.
    pub is_valid: bool,
}

impl TableView {
    /// The canonical empty view; always invalid.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            total_count: 0,
            page_size: crate::options::DEFAULT_PAGE_SIZE,
            is_valid: false,
        }
    }
}
