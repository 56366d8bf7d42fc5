//! CLI command for aggregating an event file into series

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;

use super::{load_tagged_events, write_output, OutputFormat};
use crate::config::Settings;
use crate::display::format_series_summary;
use crate::error::{SeriesError, SeriesResult};
use crate::export::{export_report_json, export_report_yaml, SeriesReport};
use crate::ingest::parse_timestamp;
use crate::series::{AggregationMode, EventFilter, ReportWindow, SeriesAggregator, TagKind};

/// Arguments of the aggregate command
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Event file (.csv, otherwise JSON)
    pub input: PathBuf,

    /// Which series to derive
    #[arg(short, long, value_enum, default_value_t = AggregationMode::Account)]
    pub mode: AggregationMode,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Reporting window start (inclusive)
    #[arg(long)]
    pub start: Option<String>,

    /// Reporting window stop (exclusive)
    #[arg(long)]
    pub stop: Option<String>,

    /// Only keep the configured number of days before now
    #[arg(long, conflicts_with_all = ["start", "stop"])]
    pub recent: bool,

    /// Only keep events tagged with this group
    #[arg(long, conflicts_with = "entity")]
    pub group: Option<String>,

    /// Only keep events tagged with this entity
    #[arg(long)]
    pub entity: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AggregateArgs {
    fn window(&self, settings: &Settings, now: NaiveDateTime) -> SeriesResult<Option<ReportWindow>> {
        if self.recent {
            return ReportWindow::trailing_days(now, settings.window.size_days).map(Some);
        }

        let stop = self.stop.as_deref().map(parse_timestamp).transpose()?;
        let start = self.start.as_deref().map(parse_timestamp).transpose()?;

        match (start, stop) {
            (None, None) => Ok(None),
            (Some(start), stop) => ReportWindow::new(start, stop.unwrap_or(now.max(start))).map(Some),
            (None, Some(stop)) => {
                ReportWindow::trailing_days(stop, settings.window.size_days).map(Some)
            }
        }
    }

    fn filter(&self, window: Option<ReportWindow>) -> EventFilter {
        let mut filter = EventFilter::new();
        if let Some(window) = window {
            filter = filter.with_window(window);
        }
        if let Some(group) = &self.group {
            filter = filter.with_tag(TagKind::Group, group.clone());
        } else if let Some(entity) = &self.entity {
            filter = filter.with_tag(TagKind::Entity, entity.clone());
        }
        filter
    }
}

/// Handle the aggregate command
pub fn handle_aggregate_command(settings: &Settings, args: AggregateArgs) -> SeriesResult<()> {
    let now = chrono::Utc::now().naive_utc();
    let window = args.window(settings, now)?;

    let events = load_tagged_events(settings, &args.input)?;

    let aggregator = SeriesAggregator::from_settings(settings);
    let events = args.filter(window).apply(aggregator.rules(), events);
    let report = SeriesReport::new(aggregator.run(&events, args.mode), window);

    write_output(args.output.as_deref(), |writer| {
        write_report(&report, args.format, args.pretty, writer)
    })
}

fn write_report(
    report: &SeriesReport,
    format: OutputFormat,
    pretty: bool,
    writer: &mut dyn Write,
) -> SeriesResult<()> {
    match format {
        OutputFormat::Json => export_report_json(report, writer, pretty),
        OutputFormat::Yaml => export_report_yaml(report, writer),
        OutputFormat::Table => write!(writer, "{}", format_series_summary(report))
            .map_err(|e| SeriesError::Export(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args() -> AggregateArgs {
        AggregateArgs {
            input: PathBuf::from("events.json"),
            mode: AggregationMode::Account,
            format: OutputFormat::Json,
            pretty: false,
            start: None,
            stop: None,
            recent: false,
            group: None,
            entity: None,
            output: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_no_window_by_default() {
        let window = args().window(&Settings::default(), now()).unwrap();
        assert!(window.is_none());
    }

    #[test]
    fn test_recent_window() {
        let mut args = args();
        args.recent = true;
        let window = args.window(&Settings::default(), now()).unwrap().unwrap();
        assert_eq!(window.stop, now());
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_explicit_window() {
        let mut args = args();
        args.start = Some("2025-01-01".to_string());
        args.stop = Some("2025-02-01".to_string());
        let window = args.window(&Settings::default(), now()).unwrap().unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());

        args.start = Some("2025-03-01".to_string());
        assert!(args.window(&Settings::default(), now()).unwrap_err().is_validation());
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let mut settings = Settings::default();
        settings.window.size_days = u32::MAX;

        let mut recent = args();
        recent.recent = true;
        assert!(recent.window(&settings, now()).unwrap_err().is_validation());

        let mut stop_only = args();
        stop_only.stop = Some("2025-01-01".to_string());
        assert!(stop_only.window(&settings, now()).unwrap_err().is_validation());
    }

    #[test]
    fn test_tag_filter_prefers_group() {
        let mut args = args();
        args.group = Some("food".to_string());
        let filter = args.filter(None);
        assert_eq!(filter.tag.unwrap().kind, TagKind::Group);
    }
}
