//! Bounded backward search for the most recent available rate

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::feed::RateFeed;
use crate::resolver::RateResolver;

/// Backward-search policy.
///
/// The lookback bound is deliberately configuration rather than a constant:
/// deployments of this service have run windows of 7, 8, 9 and 30 days.
/// Seven days covers any weekend plus a holiday cluster and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    /// Maximum number of calendar days inspected before declaring absence.
    pub max_lookback_days: u32,
    /// Skip Saturdays and Sundays without consulting the resolver. Skipped
    /// days still consume lookback budget.
    pub skip_weekends: bool,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            max_lookback_days: 7,
            skip_weekends: false,
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk backward from `from` (exclusive), one calendar day at a time, until
/// a rate resolves or the lookback window is exhausted. The search never
/// crosses the resolver's minimum-year floor, so sparse history cannot turn
/// it into an unbounded scan.
pub fn previous_available<F: RateFeed>(
    resolver: &mut RateResolver<F>,
    from: NaiveDate,
    today: NaiveDate,
    policy: &FallbackPolicy,
) -> Option<f64> {
    // The feed sometimes publishes a Saturday value for a weekend pair, so
    // in weekend-skip mode a Sunday probes its own Saturday once before the
    // main walk.
    if policy.skip_weekends && from.weekday() == Weekday::Sun {
        let saturday = from - Duration::days(1);
        if saturday.year() >= resolver.min_year() {
            if let Some(rate) = resolver.resolve(saturday, today) {
                return Some(rate);
            }
        }
    }

    for days_back in 1..=i64::from(policy.max_lookback_days) {
        let candidate = from - Duration::days(days_back);
        if candidate.year() < resolver.min_year() {
            break;
        }
        if policy.skip_weekends && is_weekend(candidate) {
            continue;
        }
        if let Some(rate) = resolver.resolve(candidate, today) {
            return Some(rate);
        }
    }
    None
}
