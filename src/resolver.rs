//! Single-date rate resolution with caching and the minimum-year floor

use chrono::{Datelike, NaiveDate};

use crate::cache::RateCache;
use crate::feed::RateFeed;
use crate::types::round4;

/// Default minimum year for archival lookups. The upstream archive holds
/// nothing of interest before it, so earlier dates are absent without a
/// network call.
pub const DEFAULT_MIN_YEAR: i32 = 2025;

/// Resolves the rate for an exact calendar date, consulting the cache before
/// the feed. All fetch failures degrade to `None`.
pub struct RateResolver<F: RateFeed> {
    feed: F,
    cache: RateCache,
    min_year: i32,
}

impl<F: RateFeed> RateResolver<F> {
    pub fn new(feed: F) -> Self {
        Self::with_min_year(feed, DEFAULT_MIN_YEAR)
    }

    pub fn with_min_year(feed: F, min_year: i32) -> Self {
        Self {
            feed,
            cache: RateCache::new(),
            min_year,
        }
    }

    /// Hard floor for archival lookups and backward searches.
    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    /// The cache, for inspection (size reporting, tests).
    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// The underlying feed.
    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Resolve the rate for `date`.
    ///
    /// `today` is the invocation's current date: it selects the live feed,
    /// while any other date goes through the archive. Dates before the
    /// minimum year are absent without a fetch. A cache hit short-circuits
    /// everything, including a live fetch for `today`.
    pub fn resolve(&mut self, date: NaiveDate, today: NaiveDate) -> Option<f64> {
        if let Some(rate) = self.cache.get(date) {
            return Some(rate);
        }

        let fetched = if date == today {
            self.feed.fetch_live()
        } else if date.year() < self.min_year {
            return None;
        } else {
            self.feed.fetch_archive(date)
        };

        match fetched {
            Ok(value) => {
                let rate = round4(value);
                Some(self.cache.insert(date, rate))
            }
            Err(err) => {
                log::warn!("rate fetch failed for {}: {}", date, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{d, MapFeed};

    #[test]
    fn test_dates_before_min_year_skip_fetch() {
        let mut resolver = RateResolver::new(MapFeed::new(None));
        let today = d(2025, 6, 1);

        assert_eq!(resolver.resolve(d(2024, 12, 31), today), None);
        assert_eq!(resolver.feed().calls(), 0);
    }

    #[test]
    fn test_live_fetch_is_memoized() {
        let mut resolver = RateResolver::new(MapFeed::new(Some(90.1234)));
        let today = d(2025, 6, 1);

        assert_eq!(resolver.resolve(today, today), Some(90.1234));
        assert_eq!(resolver.resolve(today, today), Some(90.1234));
        assert_eq!(resolver.feed().calls(), 1);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[test]
    fn test_archive_fetch_rounds_to_four_places() {
        let feed = MapFeed::new(None).with_rate(d(2025, 5, 30), 88.123456);
        let mut resolver = RateResolver::new(feed);
        let today = d(2025, 6, 1);

        assert_eq!(resolver.resolve(d(2025, 5, 30), today), Some(88.1235));
        assert_eq!(resolver.feed().calls(), 1);
    }

    #[test]
    fn test_fetch_error_is_absent_and_not_cached() {
        let mut resolver = RateResolver::new(MapFeed::new(None));
        let today = d(2025, 6, 1);

        // Archive has no entry for this day, so each attempt hits the feed
        // again: failures are never negatively cached.
        assert_eq!(resolver.resolve(d(2025, 5, 30), today), None);
        assert_eq!(resolver.resolve(d(2025, 5, 30), today), None);
        assert_eq!(resolver.feed().calls(), 2);
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_custom_min_year() {
        let feed = MapFeed::new(None).with_rate(d(2024, 7, 1), 85.0);
        let mut resolver = RateResolver::with_min_year(feed, 2024);
        let today = d(2025, 6, 1);

        assert_eq!(resolver.resolve(d(2024, 7, 1), today), Some(85.0));
        assert_eq!(resolver.resolve(d(2023, 7, 1), today), None);
        assert_eq!(resolver.feed().calls(), 1);
    }
}
