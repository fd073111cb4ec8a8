//! Month-long rate series with carry-forward gap-filling and aggregates

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::feed::RateFeed;
use crate::resolver::RateResolver;
use crate::types::{round4, Trend};

/// How the "last rate of the month" is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LastRatePolicy {
    /// Tail of the gap-filled all-days series.
    #[default]
    SeriesTail,
    /// Dedicated probe for the most recent directly resolvable day of the
    /// month, falling back to the series tail when nothing resolves.
    LastAvailableSearch,
}

/// Aggregates derived from one calendar month of rates.
///
/// `days_count` counts every day that carries a value (resolved or filled);
/// `workdays_count` counts only days the feed resolved directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub last_rate: f64,
    pub avg_rate: f64,
    /// Mean over directly resolved days only; `None` when the whole month
    /// was carried forward.
    pub avg_workdays_rate: Option<f64>,
    pub min_rate: f64,
    pub max_rate: f64,
    pub range: f64,
    pub days_count: usize,
    pub workdays_count: usize,
    pub trend: Trend,
}

/// Number of days in a calendar month; `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

fn previous_month_last_day(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first - Duration::days(1))
}

/// Most recent directly resolvable day of the month: the final calendar day,
/// then its preceding Saturday when the final day is a Sunday, then each
/// earlier day down to the 1st.
pub fn last_available_rate<F: RateFeed>(
    resolver: &mut RateResolver<F>,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<f64> {
    let last_day = days_in_month(year, month)?;
    let final_date = NaiveDate::from_ymd_opt(year, month, last_day)?;

    if let Some(rate) = resolver.resolve(final_date, today) {
        return Some(rate);
    }
    if final_date.weekday() == Weekday::Sun {
        if let Some(rate) = resolver.resolve(final_date - Duration::days(1), today) {
            return Some(rate);
        }
    }
    for day in (1..last_day).rev() {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        if let Some(rate) = resolver.resolve(date, today) {
            return Some(rate);
        }
    }
    None
}

/// Build the month's day-by-day series and derive its statistics.
///
/// The carry is seeded from the last day of the previous month, so a month
/// opening on a weekend still fills its first days. Days that resolve
/// directly enter both series and update the carry; unresolved days repeat
/// the carry into the all-days series; days with no carry and no resolution
/// are omitted entirely. A month where nothing ever resolves (and no carry
/// exists) is absent, never a zero-filled series.
pub fn monthly_stats<F: RateFeed>(
    resolver: &mut RateResolver<F>,
    year: i32,
    month: u32,
    today: NaiveDate,
    last_rate_policy: LastRatePolicy,
) -> Option<MonthlyStats> {
    if year < resolver.min_year() {
        return None;
    }
    let last_day = days_in_month(year, month)?;

    let mut carry =
        previous_month_last_day(year, month).and_then(|date| resolver.resolve(date, today));

    let mut all_days: Vec<f64> = Vec::with_capacity(last_day as usize);
    let mut workdays: Vec<f64> = Vec::new();

    for day in 1..=last_day {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        match resolver.resolve(date, today) {
            Some(rate) => {
                carry = Some(rate);
                workdays.push(rate);
                all_days.push(rate);
            }
            None => {
                if let Some(rate) = carry {
                    all_days.push(rate);
                }
            }
        }
    }

    if all_days.is_empty() {
        return None;
    }

    let first = all_days[0];
    let series_tail = all_days[all_days.len() - 1];
    let last_rate = match last_rate_policy {
        LastRatePolicy::SeriesTail => series_tail,
        LastRatePolicy::LastAvailableSearch => {
            last_available_rate(resolver, year, month, today).unwrap_or(series_tail)
        }
    };

    let min_rate = all_days.iter().copied().fold(f64::INFINITY, f64::min);
    let max_rate = all_days.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg_rate = round4(all_days.iter().sum::<f64>() / all_days.len() as f64);
    let avg_workdays_rate = if workdays.is_empty() {
        None
    } else {
        Some(round4(workdays.iter().sum::<f64>() / workdays.len() as f64))
    };

    Some(MonthlyStats {
        last_rate,
        avg_rate,
        avg_workdays_rate,
        min_rate,
        max_rate,
        range: round4(max_rate - min_rate),
        days_count: all_days.len(),
        workdays_count: workdays.len(),
        trend: Trend::of(first, series_tail),
    })
}
