//! Core data models for txn-series
//!
//! This module contains the data structures the aggregator works on: input
//! transaction events, the amount type, and the output series collection.

pub mod amount;
pub mod event;
pub mod series;

pub use amount::{Amount, AmountParseError};
pub use event::{EventValue, TransactionEvent, ValueType};
pub use series::{SeriesCollection, SeriesPoint};
