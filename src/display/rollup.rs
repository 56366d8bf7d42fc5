//! Rollup table
//!
//! One row per period and key, in period order.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::export::RollupReport;
use crate::series::{Period, PeriodTotal};

/// A row of the rollup table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PeriodTotalRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Events")]
    pub events: usize,
}

impl PeriodTotalRow {
    pub fn new(total: &PeriodTotal, period: Period) -> Self {
        let label = match period {
            Period::Month => total.start.format("%Y-%m"),
            Period::Year => total.start.format("%Y"),
        };
        Self {
            period: label.to_string(),
            key: total.key.clone(),
            amount: total.amount.to_string(),
            events: total.event_ids.len(),
        }
    }
}

/// Format a rollup report as a terminal table
pub fn format_rollup_summary(report: &RollupReport) -> String {
    let mut output = format!(
        "Totals per {} by {}  Events: {}",
        report.metadata.period, report.metadata.kind, report.metadata.event_count
    );
    if report.metadata.skipped_count > 0 {
        output.push_str(&format!("  Skipped: {}", report.metadata.skipped_count));
    }
    output.push('\n');

    if report.totals.is_empty() {
        output.push_str("No totals produced.\n");
        return output;
    }

    let rows: Vec<_> = report
        .totals
        .iter()
        .map(|total| PeriodTotalRow::new(total, report.metadata.period))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::modern());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}
