//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with ingestion, aggregation and export.

pub mod aggregate;
pub mod rollup;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{SeriesError, SeriesResult};
use crate::ingest::load_events;
use crate::models::TransactionEvent;

pub use aggregate::{handle_aggregate_command, AggregateArgs};
pub use rollup::{handle_rollup_command, RollupArgs};

/// Output format of the report commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

/// Load an input file and apply the configured tagging rules
pub fn load_tagged_events(settings: &Settings, input: &Path) -> SeriesResult<Vec<TransactionEvent>> {
    let ingested = load_events(input, &settings.extraction)?;
    if ingested.skipped > 0 {
        tracing::warn!(skipped = ingested.skipped, "some input rows were skipped");
    }

    let mut events = ingested.events;
    settings.tagging.apply(&settings.extraction, &mut events);
    Ok(events)
}

/// Run `write` against the output file, or stdout when none is given
pub fn write_output<F>(output: Option<&Path>, write: F) -> SeriesResult<()>
where
    F: FnOnce(&mut dyn Write) -> SeriesResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SeriesError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush().map_err(|e| SeriesError::Export(e.to_string()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write(&mut writer)?;
        }
    }
    Ok(())
}
