//! Report composition and delivery orchestration

use chrono::{Datelike, Duration, NaiveDate};

use crate::change::ChangeResult;
use crate::error::Result;
use crate::fallback::{previous_available, FallbackPolicy};
use crate::feed::RateFeed;
use crate::monthly::{days_in_month, monthly_stats, LastRatePolicy, MonthlyStats};
use crate::resolver::RateResolver;
use crate::retry::RetryStore;
use crate::types::{round4, ChangeDirection};

/// Delivery capability for composed report texts.
pub trait ReportSender {
    fn send(&self, text: &str) -> Result<()>;
}

/// Which calendar day triggers the monthly sub-reports. The two policies
/// are mutually exclusive: a deployment runs exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthBoundary {
    /// Day 1, reporting on the previous completed month.
    FirstOfMonth,
    /// The month's final day, reporting on the current month.
    LastOfMonth,
}

/// Tunable reporting behavior.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// ISO code of the tracked currency.
    pub currency_code: String,
    /// Multiplier applied to the last monthly rate for the projected-rate
    /// report.
    pub markup_multiplier: f64,
    /// Suppress the daily report when the rate did not move against the
    /// reference, avoiding no-op notifications.
    pub skip_unchanged: bool,
    pub month_boundary: MonthBoundary,
    pub fallback: FallbackPolicy,
    pub last_rate_policy: LastRatePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_code: "USD".to_string(),
            markup_multiplier: 1.06,
            skip_unchanged: true,
            month_boundary: MonthBoundary::LastOfMonth,
            fallback: FallbackPolicy::default(),
            last_rate_policy: LastRatePolicy::default(),
        }
    }
}

/// Orchestrates the daily and month-boundary reporting paths over the
/// resolver, the sender and the retry store. Both entry points take the
/// current date explicitly, so a test drives them without a clock.
pub struct ReportService<F: RateFeed, S: ReportSender> {
    resolver: RateResolver<F>,
    sender: S,
    retry: RetryStore,
    config: ReportConfig,
}

impl<F: RateFeed, S: ReportSender> ReportService<F, S> {
    pub fn new(
        resolver: RateResolver<F>,
        sender: S,
        retry: RetryStore,
        config: ReportConfig,
    ) -> Self {
        Self {
            resolver,
            sender,
            retry,
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn resolver(&self) -> &RateResolver<F> {
        &self.resolver
    }

    fn deliver(&self, text: &str) -> bool {
        match self.sender.send(text) {
            Ok(()) => {
                log::info!("report delivered");
                true
            }
            Err(err) => {
                log::error!("report delivery failed: {}", err);
                false
            }
        }
    }

    /// Daily entry point. Resolves today's rate and the most recent
    /// reference rate, composes the change report and sends it. On send
    /// failure the report is persisted for the retry pass and a short alert
    /// is attempted instead. Returns true when the primary report was
    /// delivered.
    pub fn daily_report(&mut self, today: NaiveDate) -> bool {
        let current = self.resolver.resolve(today, today);
        let reference = previous_available(&mut self.resolver, today, today, &self.config.fallback);

        let (Some(current), Some(reference)) = (current, reference) else {
            log::warn!("rate data unavailable, skipping daily report");
            return false;
        };

        if self.config.skip_unchanged && current == reference {
            log::info!("rate unchanged since last report, nothing to send");
            return false;
        }

        let change = ChangeResult::between(current, reference);
        let message = self.compose_daily(today, current, &change);

        if !self.deliver(&message) {
            let alert = format!(
                "⚠️ Could not deliver the {} rate report. It will be retried at the next scheduled run.",
                self.config.currency_code
            );
            self.deliver(&alert);
            if let Err(err) = self.retry.save(&message) {
                log::error!("failed to persist undelivered report: {}", err);
            }
            return false;
        }

        if self.is_month_boundary(today) {
            let (year, month) = self.reported_month(today);
            self.monthly_report(year, month, today);
        }
        true
    }

    /// Month-boundary entry point: the projected-rate, averages and
    /// analytics sub-reports for an explicit month. Each is sent
    /// independently; a failure in one does not block the others and none
    /// of them touch the retry store. Returns true when all three were
    /// delivered.
    pub fn monthly_report(&mut self, year: i32, month: u32, today: NaiveDate) -> bool {
        let stats = monthly_stats(
            &mut self.resolver,
            year,
            month,
            today,
            self.config.last_rate_policy,
        );
        let Some(stats) = stats else {
            log::warn!(
                "no rates resolved for {}-{:02}, monthly reports skipped",
                year,
                month
            );
            return false;
        };

        let mut delivered = true;
        for text in self.compose_monthly(year, month, &stats) {
            delivered &= self.deliver(&text);
        }
        delivered
    }

    /// Resend of the persisted daily report, if one is pending.
    pub fn retry_pending(&self) -> bool {
        self.retry.load_and_retry(|text| self.deliver(text))
    }

    fn is_month_boundary(&self, today: NaiveDate) -> bool {
        match self.config.month_boundary {
            MonthBoundary::FirstOfMonth => today.day() == 1,
            MonthBoundary::LastOfMonth => {
                days_in_month(today.year(), today.month()) == Some(today.day())
            }
        }
    }

    fn reported_month(&self, today: NaiveDate) -> (i32, u32) {
        match self.config.month_boundary {
            MonthBoundary::FirstOfMonth => {
                let prev = today - Duration::days(1);
                (prev.year(), prev.month())
            }
            MonthBoundary::LastOfMonth => (today.year(), today.month()),
        }
    }

    fn compose_daily(&self, today: NaiveDate, rate: f64, change: &ChangeResult) -> String {
        let jump_note = if change.jump {
            "\n🚨 Large rate jump detected!"
        } else {
            ""
        };
        format!(
            "💵 {} rate for {}:\n🔹 {:.4} ₽\n🔸 Change: {} {}{}",
            self.config.currency_code,
            today.format("%d.%m.%Y"),
            rate,
            format_change(change),
            format_percent(change),
            jump_note,
        )
    }

    fn compose_monthly(&self, year: i32, month: u32, stats: &MonthlyStats) -> Vec<String> {
        let label = month_label(year, month);
        let (next_year, next_month) = month_after(year, month);
        let projected = round4(stats.last_rate * self.config.markup_multiplier);

        let projection = format!(
            "🔮 Projected {} rate for {}:\n🔹 {:.4} ₽\n🔸 Based on: {:.4} ₽ × {}",
            self.config.currency_code,
            month_label(next_year, next_month),
            projected,
            stats.last_rate,
            self.config.markup_multiplier,
        );

        let mut averages = format!(
            "📢 Average {} rate for {}:\n🔹 {:.4} ₽\n🔸 Days in calculation: {}\n💰 Last rate of the month: {:.4} ₽",
            self.config.currency_code, label, stats.avg_rate, stats.days_count, stats.last_rate,
        );
        if let Some(workdays_avg) = stats.avg_workdays_rate {
            averages.push_str(&format!(
                "\n📐 Workday average: {:.4} ₽ ({} days)",
                workdays_avg, stats.workdays_count,
            ));
        }

        let analytics = format!(
            "📅 Analytics for {}:\n🔻 Low: {:.4} ₽\n🔺 High: {:.4} ₽\n▪️ Range: {:.4} ₽\n📊 Trend: {}",
            label, stats.min_rate, stats.max_rate, stats.range, stats.trend,
        );

        vec![projection, averages, analytics]
    }
}

fn format_change(change: &ChangeResult) -> String {
    match change.direction {
        ChangeDirection::Rising => format!("📈 +{:.4}", change.delta),
        ChangeDirection::Falling => format!("📉 {:.4}", change.delta),
        ChangeDirection::Unchanged => "❎ unchanged".to_string(),
    }
}

fn format_percent(change: &ChangeResult) -> String {
    match change.percent {
        Some(percent) => format!("({:+.2}%)", percent),
        None => String::new(),
    }
}

fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%B %Y").to_string(),
        None => format!("{}-{:02}", year, month),
    }
}

fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.currency_code, "USD");
        assert_eq!(config.markup_multiplier, 1.06);
        assert!(config.skip_unchanged);
        assert_eq!(config.month_boundary, MonthBoundary::LastOfMonth);
        assert_eq!(config.fallback.max_lookback_days, 7);
        assert_eq!(config.last_rate_policy, LastRatePolicy::SeriesTail);
    }

    #[test]
    fn test_format_change_markers() {
        let rising = ChangeResult::between(90.0, 89.0);
        assert_eq!(format_change(&rising), "📈 +1.0000");

        let falling = ChangeResult::between(89.0, 90.0);
        assert_eq!(format_change(&falling), "📉 -1.0000");

        let flat = ChangeResult::between(90.0, 90.0);
        assert_eq!(format_change(&flat), "❎ unchanged");
    }

    #[test]
    fn test_format_percent() {
        let change = ChangeResult::between(101.0, 100.0);
        assert_eq!(format_percent(&change), "(+1.00%)");

        let no_reference = ChangeResult::between(1.0, 0.0);
        assert_eq!(format_percent(&no_reference), "");
    }

    #[test]
    fn test_month_label_and_successor() {
        assert_eq!(month_label(2025, 8), "August 2025");
        assert_eq!(month_after(2025, 8), (2025, 9));
        assert_eq!(month_after(2025, 12), (2026, 1));
    }

    #[test]
    fn test_trend_in_analytics_text() {
        let stats = MonthlyStats {
            last_rate: 91.0,
            avg_rate: 90.5,
            avg_workdays_rate: Some(90.6),
            min_rate: 90.0,
            max_rate: 91.0,
            range: 1.0,
            days_count: 31,
            workdays_count: 22,
            trend: Trend::Rising,
        };
        assert!(stats.trend.to_string().contains("rising"));
        assert_eq!(stats.range, 1.0);
    }
}
