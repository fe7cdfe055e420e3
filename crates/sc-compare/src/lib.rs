//! sc-compare: side-by-side comparison of selected simulation records.

pub mod columns;
pub mod diff;
pub mod matrix;
pub mod metrics;
pub mod session;

pub use columns::{ColumnHeader, ColumnState, MAX_SELECTION, SelectOutcome};
pub use diff::{EMPTY_MARK, highlight, normalize, row_differs};
pub use matrix::{CellValue, ComparisonMatrix, MetricRow, SectionRows, build_matrix, cell};
pub use metrics::{ExpandedSections, MetricDef, MetricSource, Section};
pub use session::ComparisonSession;
