//! CLI command for per-period totals by group or entity

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::{load_tagged_events, write_output, OutputFormat};
use crate::config::Settings;
use crate::display::format_rollup_summary;
use crate::error::{SeriesError, SeriesResult};
use crate::export::{export_rollup_json, export_rollup_yaml, RollupReport};
use crate::series::{rollup, Period, TagKind};

/// Arguments of the rollup command
#[derive(Args, Debug)]
pub struct RollupArgs {
    /// Event file (.csv, otherwise JSON)
    pub input: PathBuf,

    /// Key totals by group or entity
    #[arg(short, long, value_enum, default_value_t = TagKind::Group)]
    pub by: TagKind,

    /// Bucket size
    #[arg(short, long, value_enum, default_value_t = Period::Month)]
    pub period: Period,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the rollup command
pub fn handle_rollup_command(settings: &Settings, args: RollupArgs) -> SeriesResult<()> {
    let events = load_tagged_events(settings, &args.input)?;
    let report = RollupReport::new(rollup(&settings.extraction, &events, args.by, args.period));

    write_output(args.output.as_deref(), |writer| {
        write_rollup(&report, args.format, args.pretty, writer)
    })
}

fn write_rollup(
    report: &RollupReport,
    format: OutputFormat,
    pretty: bool,
    writer: &mut dyn Write,
) -> SeriesResult<()> {
    match format {
        OutputFormat::Json => export_rollup_json(report, writer, pretty),
        OutputFormat::Yaml => export_rollup_yaml(report, writer),
        OutputFormat::Table => write!(writer, "{}", format_rollup_summary(report))
            .map_err(|e| SeriesError::Export(e.to_string())),
    }
}
