//! Running totals for one aggregation run

use std::collections::BTreeMap;

use crate::models::Amount;

/// Keyed running totals, seeded lazily on first use
///
/// Each key is independent; a key that has never been touched has no total.
#[derive(Debug, Clone, Default)]
pub struct Accumulators {
    totals: BTreeMap<String, Amount>,
}

impl Accumulators {
    /// Create an empty set of totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the total for `key` and return the new total
    ///
    /// `seed` is evaluated only when the key is seen for the first time.
    pub fn accumulate<F>(&mut self, key: &str, seed: F, delta: Amount) -> Amount
    where
        F: FnOnce() -> Amount,
    {
        let total = self.totals.entry(key.to_string()).or_insert_with(seed);
        *total += delta;
        *total
    }

    /// Consume into the final totals by key
    pub fn into_totals(self) -> BTreeMap<String, Amount> {
        self.totals
    }
}
