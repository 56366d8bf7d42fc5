//! Per-period totals by group or entity
//!
//! Buckets events into calendar months or years and sums their signed
//! amounts per tag. An event carrying several tags counts towards each of
//! them. Untagged events land in fallback keys: `Spending no group` /
//! `Income no group` by sign for groups, `No entity` for entities.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::extract::{ExtractionRules, TagKind};
use super::tagging::{INCOME_NO_GROUP, NO_ENTITY, SPENDING_NO_GROUP};
use crate::models::{Amount, TransactionEvent};

/// Calendar period of a rollup bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Month,
    Year,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month => write!(f, "month"),
            Period::Year => write!(f, "year"),
        }
    }
}

impl Period {
    /// Half-open bucket `[start, stop)` containing `at`
    ///
    /// `None` when the bucket end is past the last representable date.
    pub fn bucket(&self, at: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = at.date();
        let (start, stop) = match self {
            Period::Month => {
                let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
                (start, start.checked_add_months(Months::new(1))?)
            }
            Period::Year => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
                (start, start.checked_add_months(Months::new(12))?)
            }
        };
        Some((start.and_hms_opt(0, 0, 0)?, stop.and_hms_opt(0, 0, 0)?))
    }
}

/// Sum of one tag's movements over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub key: String,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    pub amount: Amount,
    /// Contributing events, in input order
    pub event_ids: Vec<String>,
}

/// Output of one rollup run
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup {
    pub kind: TagKind,
    pub period: Period,
    /// Totals ordered by period start, then key
    pub totals: Vec<PeriodTotal>,
    pub event_count: usize,
    /// Events whose date has no representable bucket
    pub skipped: usize,
}

fn fallback_key(kind: TagKind, amount: Amount) -> &'static str {
    match kind {
        TagKind::Entity => NO_ENTITY,
        TagKind::Group if amount.is_available() && !amount.is_negative() => INCOME_NO_GROUP,
        TagKind::Group => SPENDING_NO_GROUP,
    }
}

/// Sum event amounts per tag and period
pub fn rollup(
    rules: &ExtractionRules,
    events: &[TransactionEvent],
    kind: TagKind,
    period: Period,
) -> Rollup {
    let mut buckets: BTreeMap<(NaiveDateTime, String), PeriodTotal> = BTreeMap::new();
    let mut skipped = 0;

    for event in events {
        let Some((start, stop)) = period.bucket(event.start) else {
            warn!(event = %event.id, "no {} bucket for {}", period, event.start);
            skipped += 1;
            continue;
        };

        let amount = rules.extract(event).amount;
        let mut keys = rules.distinct_tags(event, kind);
        if keys.is_empty() {
            keys.push(fallback_key(kind, amount));
        }

        for key in keys {
            let total = buckets
                .entry((start, key.to_string()))
                .or_insert_with(|| PeriodTotal {
                    key: key.to_string(),
                    start,
                    stop,
                    amount: Amount::zero(),
                    event_ids: Vec::new(),
                });
            total.amount += amount;
            total.event_ids.push(event.id.clone());
        }
    }

    debug!(%kind, %period, buckets = buckets.len(), skipped, "rollup finished");

    Rollup {
        kind,
        period,
        totals: buckets.into_values().collect(),
        event_count: events.len(),
        skipped,
    }
}
