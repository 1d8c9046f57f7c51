//! Data model for the resilient tabular pipeline.
//!
//! Pure types only: value classification, normalized rows, column
//! descriptors, view options, the assembled [`TableView`], and the guard's
//! diagnostic trace. All logic over these types lives in the engine crates.

pub mod column;
pub mod error;
pub mod options;
pub mod row;
pub mod trace;
pub mod value;
pub mod view;

pub use column::{ColumnDescriptor, SortOrder};
pub use error::{Result, TabsafeError};
pub use options::{DEFAULT_PAGE_SIZE, ViewOptions};
pub use row::{Anomaly, NormalizedRow};
pub use trace::{AnomalyTrace, FaultKind, TRACE_CAPACITY, TraceLog};
pub use value::{Kind, classify};
pub use view::TableView;
