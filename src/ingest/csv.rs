//! CSV event import
//!
//! Expected header: `id,start,amount,balance,concept,group,entity`. Only
//! `start` is required. Cells are stored under the value names of the
//! configured extraction rules. The `group` and `entity` columns may hold
//! several tags separated by `;`, which become prefixed values (`group.0`,
//! `group.1`, ... with the default rules).

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::warn;

use super::{generate_id, parse_timestamp, Ingested};
use crate::error::SeriesResult;
use crate::models::{EventValue, TransactionEvent};
use crate::series::ExtractionRules;

/// Separator between several tags in one cell
pub const TAG_CELL_SEPARATOR: char = ';';

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    start: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    balance: Option<String>,
    #[serde(default)]
    concept: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    entity: Option<String>,
}

fn push_tags(values: &mut Vec<EventValue>, prefix: &str, cell: Option<String>) {
    let Some(cell) = cell else { return };
    let tags = cell
        .split(TAG_CELL_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty());
    for (i, tag) in tags.enumerate() {
        values.push(EventValue::text(format!("{}{}", prefix, i), tag));
    }
}

/// Parse events from CSV text
///
/// Rows with an unparsable `start` are skipped and counted; a malformed
/// file (bad header, wrong field count) is an error.
pub fn parse_csv(contents: &str, rules: &ExtractionRules) -> SeriesResult<Ingested> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut ingested = Ingested::default();

    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = row?;

        let start = match parse_timestamp(&row.start) {
            Ok(start) => start,
            Err(e) => {
                warn!(line, error = %e, "skipping CSV row");
                ingested.skipped += 1;
                continue;
            }
        };

        let mut values = Vec::new();
        if let Some(amount) = row.amount {
            values.push(EventValue::double(&rules.amount, amount));
        }
        if let Some(balance) = row.balance {
            values.push(EventValue::double(&rules.balance, balance));
        }
        if let Some(concept) = row.concept {
            values.push(EventValue::text(&rules.concept, concept));
        }
        push_tags(&mut values, &rules.group_prefix, row.group);
        push_tags(&mut values, &rules.entity_prefix, row.entity);

        ingested.events.push(TransactionEvent {
            id: row.id.filter(|id| !id.is_empty()).unwrap_or_else(generate_id),
            start,
            values,
        });
    }

    Ok(ingested)
}
