//! Event selection ahead of aggregation
//!
//! Restricts an event list to a reporting window and, optionally, to events
//! carrying a given group or entity tag. Order is preserved.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::extract::{ExtractionRules, TagKind};
use crate::error::{SeriesError, SeriesResult};
use crate::models::TransactionEvent;

/// Half-open reporting window `[start, stop)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
}

impl ReportWindow {
    /// Create a window, rejecting an inverted range
    pub fn new(start: NaiveDateTime, stop: NaiveDateTime) -> SeriesResult<Self> {
        if start > stop {
            return Err(SeriesError::Validation(format!(
                "Reporting start {} is after stop {}",
                start, stop
            )));
        }
        Ok(Self { start, stop })
    }

    /// Window covering the `days` days before `now`
    ///
    /// Fails when the start would fall outside the representable date range.
    pub fn trailing_days(now: NaiveDateTime, days: u32) -> SeriesResult<Self> {
        let start = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(|| {
                SeriesError::Validation(format!(
                    "A window of {} days before {} is out of range",
                    days, now
                ))
            })?;
        Ok(Self { start, stop: now })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.stop
    }
}

/// Keep only events carrying a specific tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub kind: TagKind,
    pub value: String,
}

/// Combined event filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub window: Option<ReportWindow>,
    pub tag: Option<TagFilter>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: ReportWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_tag(mut self, kind: TagKind, value: impl Into<String>) -> Self {
        self.tag = Some(TagFilter {
            kind,
            value: value.into(),
        });
        self
    }

    pub fn matches(&self, rules: &ExtractionRules, event: &TransactionEvent) -> bool {
        if let Some(window) = &self.window {
            if !window.contains(event.start) {
                return false;
            }
        }
        match &self.tag {
            Some(tag) => rules.has_tag(event, tag.kind, &tag.value),
            None => true,
        }
    }

    /// Return the matching events in their original order
    pub fn apply(&self, rules: &ExtractionRules, events: Vec<TransactionEvent>) -> Vec<TransactionEvent> {
        let total = events.len();
        let kept: Vec<_> = events
            .into_iter()
            .filter(|event| self.matches(rules, event))
            .collect();

        if kept.len() < total {
            tracing::debug!(kept = kept.len(), dropped = total - kept.len(), "events filtered");
        }
        kept
    }
}
