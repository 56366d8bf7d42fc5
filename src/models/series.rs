//! Chart series model
//!
//! A series collection maps series names to ordered points. Series come into
//! existence with their first point, so a missing key means nothing of that
//! kind happened in the input.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::amount::Amount;

/// A single chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Point identifier (event id, possibly prefixed)
    pub id: String,
    /// Legend label the point belongs to
    pub group: String,
    /// Event timestamp
    pub x: NaiveDateTime,
    /// Plotted value
    pub y: Amount,
    /// HTML tooltip
    pub tooltip: String,
}

/// Named series produced by one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesCollection {
    series: BTreeMap<String, Vec<SeriesPoint>>,
}

impl SeriesCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, creating the series on first use
    pub fn push(&mut self, name: &str, point: SeriesPoint) {
        match self.series.get_mut(name) {
            Some(points) => points.push(point),
            None => {
                self.series.insert(name.to_string(), vec![point]);
            }
        }
    }

    /// Get the points of a series
    pub fn get(&self, name: &str) -> Option<&[SeriesPoint]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Check whether a series exists
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Iterate over (name, points) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SeriesPoint])> {
        self.series
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    /// Number of series
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if no series were produced
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all series
    pub fn point_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}
