//! Series aggregation for txn-series
//!
//! Derives chart series from ordered transaction events:
//!
//! - `extract`: which event values feed the aggregator
//! - `layout`: aggregation modes, series names and their policies
//! - `accumulator`: per-run running totals
//! - `tooltip`: HTML tooltips for chart points
//! - `aggregator`: the shared aggregation routine
//! - `filter`: reporting window and tag selection
//! - `tagging`: concept rules that assign groups and entities
//! - `rollup`: per-month and per-year totals by tag

pub mod accumulator;
pub mod aggregator;
pub mod extract;
pub mod filter;
pub mod layout;
pub mod rollup;
pub mod tagging;
pub mod tooltip;

pub use accumulator::Accumulators;
pub use aggregator::{Aggregation, SeriesAggregator};
pub use extract::{ExtractedFields, ExtractionRules, TagKind};
pub use filter::{EventFilter, ReportWindow, TagFilter};
pub use layout::{AggregationMode, Lane, SeedPolicy, SeriesTarget, SignPolicy};
pub use rollup::{rollup, Period, PeriodTotal, Rollup};
pub use tagging::{EntityRule, GroupRule, MatchRule, SignCondition, TaggingRules};
pub use tooltip::TooltipBuilder;
