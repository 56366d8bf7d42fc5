//! Display formatting for terminal output
//!
//! Renders per-series summaries of aggregation runs and per-period rollup
//! totals as tables.

pub mod rollup;
pub mod summary;

pub use rollup::{format_rollup_summary, PeriodTotalRow};
pub use summary::{format_series_summary, SeriesSummaryRow};
