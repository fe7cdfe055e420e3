//! Shared application service layer for the simulation catalog browser.
//!
//! Loads configuration and catalog files and wires the filter and comparison
//! engines into sessions that a frontend can drive.

pub mod browse_service;
pub mod catalog_service;
pub mod compare_service;
pub mod config;
pub mod error;

pub use browse_service::{BrowseSession, FacetPanelField, FacetPanelGroup};
pub use catalog_service::{RecordSummary, load_catalog, summarize};
pub use compare_service::{
    ComparisonReport, ReportRow, ReportSection, comparison_report, open_comparison,
    reorder_columns, select_record,
};
pub use config::{BrowserConfig, load_config, parse_config};
pub use error::{AppError, AppResult};
