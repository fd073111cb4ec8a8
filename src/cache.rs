//! In-memory cache of resolved rates

use chrono::NaiveDate;
use std::collections::HashMap;

/// Process-lifetime cache of resolved rates, one entry per calendar day.
///
/// First resolution wins: `insert` never overwrites an existing entry, so a
/// rate observed for a date stays stable for the rest of the process (this
/// includes an intraday value cached for "today"). The data set is naturally
/// bounded to one value per calendar day, so there is no eviction, and the
/// cache is not persisted across restarts.
#[derive(Debug, Default, Clone)]
pub struct RateCache {
    rates: HashMap<NaiveDate, f64>,
}

impl RateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached rate for `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.rates.get(&date).copied()
    }

    /// Insert a resolved rate. Returns the value now cached for `date`,
    /// which is the existing one when the date was already resolved.
    pub fn insert(&mut self, date: NaiveDate, rate: f64) -> f64 {
        *self.rates.entry(date).or_insert(rate)
    }

    /// Number of resolved days.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
