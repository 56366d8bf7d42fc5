//! JSON Export functionality
//!
//! Wraps aggregation and rollup results in versioned report envelopes and
//! writes them as JSON for the charting layer.

use crate::error::{SeriesError, SeriesResult};
use crate::models::SeriesCollection;
use crate::series::{Aggregation, AggregationMode, Period, PeriodTotal, ReportWindow, Rollup, TagKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// Report metadata for the chart page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version for compatibility checking
    pub version: String,

    /// Aggregation mode that produced the series
    pub mode: AggregationMode,

    /// Start of the reporting window, if one was applied
    pub reporting_start: Option<NaiveDateTime>,

    /// Stop of the reporting window, if one was applied
    pub reporting_stop: Option<NaiveDateTime>,

    /// Number of events aggregated
    pub event_count: usize,

    /// Events whose amount could not be read
    pub unavailable_count: usize,

    /// Report timestamp
    pub generated_at: DateTime<Utc>,
}

/// Series plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub metadata: ReportMetadata,
    pub series: SeriesCollection,
}

impl SeriesReport {
    /// Build a report from an aggregation run
    pub fn new(aggregation: Aggregation, window: Option<ReportWindow>) -> Self {
        Self {
            metadata: ReportMetadata {
                version: REPORT_SCHEMA_VERSION.to_string(),
                mode: aggregation.mode,
                reporting_start: window.map(|w| w.start),
                reporting_stop: window.map(|w| w.stop),
                event_count: aggregation.event_count,
                unavailable_count: aggregation.unavailable_count,
                generated_at: Utc::now(),
            },
            series: aggregation.series,
        }
    }
}

/// Rollup metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupMetadata {
    pub version: String,

    /// Whether totals are keyed by group or entity
    pub kind: TagKind,

    /// Bucket size
    pub period: Period,

    pub event_count: usize,

    /// Events left out because their date has no bucket
    pub skipped_count: usize,

    pub generated_at: DateTime<Utc>,
}

/// Per-period totals plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupReport {
    pub metadata: RollupMetadata,
    pub totals: Vec<PeriodTotal>,
}

impl RollupReport {
    pub fn new(rollup: Rollup) -> Self {
        Self {
            metadata: RollupMetadata {
                version: REPORT_SCHEMA_VERSION.to_string(),
                kind: rollup.kind,
                period: rollup.period,
                event_count: rollup.event_count,
                skipped_count: rollup.skipped,
                generated_at: Utc::now(),
            },
            totals: rollup.totals,
        }
    }
}

fn write_json<T: Serialize, W: Write + ?Sized>(value: &T, writer: &mut W, pretty: bool) -> SeriesResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    }
    .map_err(|e| SeriesError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SeriesError::Export(e.to_string()))?;

    Ok(())
}

/// Write a report as JSON
pub fn export_report_json<W: Write + ?Sized>(
    report: &SeriesReport,
    writer: &mut W,
    pretty: bool,
) -> SeriesResult<()> {
    write_json(report, writer, pretty)
}

/// Write a rollup report as JSON
pub fn export_rollup_json<W: Write + ?Sized>(
    report: &RollupReport,
    writer: &mut W,
    pretty: bool,
) -> SeriesResult<()> {
    write_json(report, writer, pretty)
}
