//! txn-series - transaction events to chart series
//!
//! This library derives running-total chart series from an ordered list of
//! bank transaction events: the split between incoming and spending
//! transactions, the evolution of the account balance, per-group or
//! per-entity accumulations, and per-period totals by tag. Untagged events can
//! be tagged from their concept with configurable rules.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Events, amounts and series
//! - `series`: Extraction rules, aggregation modes, the aggregator, tagging
//!   rules and period rollups
//! - `ingest`: Loading events from JSON and CSV
//! - `export`: Report envelope and JSON/YAML writers
//! - `display`: Terminal summary tables
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use txn_series::series::{AggregationMode, ExtractionRules, SeriesAggregator};
//!
//! let rules = ExtractionRules::default();
//! let events = txn_series::ingest::load_events(path, &rules)?.events;
//! let series = SeriesAggregator::default().aggregate(&events, AggregationMode::Account);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod series;

pub use error::{SeriesError, SeriesResult};
pub use models::{Amount, SeriesCollection, SeriesPoint, TransactionEvent};
pub use series::{AggregationMode, SeriesAggregator};
