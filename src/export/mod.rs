//! Export module for txn-series
//!
//! Writes aggregation results in machine-readable formats:
//! - JSON: for chart pages and other programs
//! - YAML: for human inspection

pub mod json;
pub mod yaml;

pub use json::{
    export_report_json, export_rollup_json, ReportMetadata, RollupMetadata, RollupReport,
    SeriesReport, REPORT_SCHEMA_VERSION,
};
pub use yaml::{export_report_yaml, export_rollup_yaml};
