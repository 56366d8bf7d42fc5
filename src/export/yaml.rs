//! YAML Export functionality
//!
//! Writes series and rollup reports as YAML for human inspection.

use crate::error::{SeriesError, SeriesResult};
use crate::export::json::{RollupReport, SeriesReport};
use std::io::Write;

/// Write a report as YAML, preceded by a comment header
pub fn export_report_yaml<W: Write + ?Sized>(report: &SeriesReport, writer: &mut W) -> SeriesResult<()> {
    writeln!(writer, "# txn-series report")
        .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", report.metadata.generated_at)
        .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(writer, "# Mode: {}", report.metadata.mode)
        .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SeriesError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| SeriesError::Export(e.to_string()))?;

    Ok(())
}

/// Write a rollup report as YAML, preceded by a comment header
pub fn export_rollup_yaml<W: Write + ?Sized>(report: &RollupReport, writer: &mut W) -> SeriesResult<()> {
    writeln!(writer, "# txn-series rollup")
        .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", report.metadata.generated_at)
        .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Totals per {} by {}",
        report.metadata.period, report.metadata.kind
    )
    .map_err(|e| SeriesError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SeriesError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| SeriesError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventValue, TransactionEvent};
    use crate::series::{AggregationMode, SeriesAggregator};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let events = vec![TransactionEvent::new("e1", start)
            .with_value(EventValue::double("amount", "-5"))
            .with_value(EventValue::text("group", "food"))];
        let run = SeriesAggregator::default().run(&events, AggregationMode::Group);
        let report = SeriesReport::new(run, None);

        let mut output = Vec::new();
        export_report_yaml(&report, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# txn-series report"));
        assert!(text.contains("# Mode: group"));
        assert!(text.contains("accumulated_groups_evolution"));
        assert!(text.contains("accumulated-evolution-e1"));
    }

    #[test]
    fn test_rollup_yaml_export() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let events = vec![TransactionEvent::new("e1", start)
            .with_value(EventValue::double("amount", "-5"))];
        let rollup = crate::series::rollup(
            &crate::series::ExtractionRules::default(),
            &events,
            crate::series::TagKind::Entity,
            crate::series::Period::Year,
        );

        let mut output = Vec::new();
        export_rollup_yaml(&RollupReport::new(rollup), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# txn-series rollup"));
        assert!(text.contains("# Totals per year by entity"));
        assert!(text.contains("No entity"));
    }
}
