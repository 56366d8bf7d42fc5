//! Event ingestion for txn-series
//!
//! Loads ordered transaction events from JSON exports or CSV files. File
//! order is preserved; the aggregator trusts it.

pub mod csv;
pub mod json;

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{SeriesError, SeriesResult};
use crate::models::TransactionEvent;
use crate::series::ExtractionRules;

pub use self::csv::parse_csv;
pub use self::json::parse_json;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Pick the format from a file extension (`.csv`, anything else is JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

/// Events read from an input, plus how many records were skipped
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    pub events: Vec<TransactionEvent>,
    pub skipped: usize,
}

/// Load events from a file
///
/// CSV cells are stored under the value names in `rules`; JSON events carry
/// their own value names.
pub fn load_events(path: &Path, rules: &ExtractionRules) -> SeriesResult<Ingested> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        SeriesError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let ingested = match InputFormat::from_path(path) {
        InputFormat::Json => parse_json(&contents)?,
        InputFormat::Csv => parse_csv(&contents, rules)?,
    };

    tracing::info!(
        path = %path.display(),
        events = ingested.events.len(),
        skipped = ingested.skipped,
        "events loaded"
    );
    Ok(ingested)
}

/// Parse an event timestamp
///
/// Accepts RFC 3339 (converted to UTC), `YYYY-MM-DDTHH:MM:SS[.f]`,
/// `YYYY-MM-DD HH:MM:SS[.f]`, or a bare date (midnight).
pub fn parse_timestamp(s: &str) -> SeriesResult<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SeriesError::Validation(format!("Invalid timestamp: '{}'", s)))
}

/// Generate an identifier for an event that has none
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
