//! Series summary table
//!
//! One row per series with its point count, covered time span and final
//! value.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::export::SeriesReport;
use crate::models::SeriesCollection;

/// A row of the series summary table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct SeriesSummaryRow {
    #[tabled(rename = "Series")]
    pub name: String,
    #[tabled(rename = "Points")]
    pub points: usize,
    #[tabled(rename = "First")]
    pub first: String,
    #[tabled(rename = "Last")]
    pub last: String,
    #[tabled(rename = "Last value")]
    pub last_value: String,
}

impl SeriesSummaryRow {
    /// Summarize every series of a collection, in name order
    pub fn from_collection(collection: &SeriesCollection) -> Vec<Self> {
        collection
            .iter()
            .map(|(name, points)| {
                let first = points.first();
                let last = points.last();
                Self {
                    name: name.to_string(),
                    points: points.len(),
                    first: first.map(|p| p.x.to_string()).unwrap_or_default(),
                    last: last.map(|p| p.x.to_string()).unwrap_or_default(),
                    last_value: last.map(|p| p.y.to_string()).unwrap_or_default(),
                }
            })
            .collect()
    }
}

/// Format a report as a terminal summary
pub fn format_series_summary(report: &SeriesReport) -> String {
    let mut output = format!(
        "Mode: {}  Events: {}",
        report.metadata.mode, report.metadata.event_count
    );
    if report.metadata.unavailable_count > 0 {
        output.push_str(&format!(
            "  Unavailable amounts: {}",
            report.metadata.unavailable_count
        ));
    }
    output.push('\n');

    if report.series.is_empty() {
        output.push_str("No series produced.\n");
        return output;
    }

    let rows = SeriesSummaryRow::from_collection(&report.series);
    let mut table = Table::new(rows);
    table.with(Style::modern());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
