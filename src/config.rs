//! Environment-driven service configuration

use chrono::NaiveTime;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{RatewatchError, Result};
use crate::fallback::FallbackPolicy;
use crate::report::{MonthBoundary, ReportConfig};
use crate::resolver::DEFAULT_MIN_YEAR;
use crate::retry::DEFAULT_RETRY_FILE;

pub const DEFAULT_BASE_URL: &str = "https://www.cbr-xml-daily.ru";
pub const DEFAULT_API_URL: &str = "https://api.internal.myteam.mail.ru/bot/v1";

/// Runtime configuration, read from `RATEWATCH_*` environment variables.
/// Only the bot token and chat id are mandatory; everything else has the
/// production defaults baked in (07:21 report, 07:00 retry, 55-minute
/// keep-alive).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub chat_id: String,
    pub base_url: String,
    pub api_url: String,
    pub min_year: i32,
    pub retry_file: PathBuf,
    pub report_time: NaiveTime,
    pub retry_time: NaiveTime,
    pub keep_alive_minutes: u32,
    pub report: ReportConfig,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = require("RATEWATCH_TOKEN")?;
        let chat_id = require("RATEWATCH_CHAT_ID")?;

        let fallback = FallbackPolicy {
            max_lookback_days: parse_or("RATEWATCH_LOOKBACK_DAYS", 7)?,
            skip_weekends: flag("RATEWATCH_SKIP_WEEKENDS"),
        };

        let report = ReportConfig {
            currency_code: optional("RATEWATCH_CURRENCY").unwrap_or_else(|| "USD".to_string()),
            skip_unchanged: !flag("RATEWATCH_REPORT_UNCHANGED"),
            month_boundary: parse_boundary(
                optional("RATEWATCH_MONTH_BOUNDARY").as_deref().unwrap_or("last"),
            )?,
            fallback,
            ..ReportConfig::default()
        };

        Ok(Self {
            token,
            chat_id,
            base_url: optional("RATEWATCH_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            api_url: optional("RATEWATCH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            min_year: parse_or("RATEWATCH_MIN_YEAR", DEFAULT_MIN_YEAR)?,
            retry_file: optional("RATEWATCH_RETRY_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RETRY_FILE)),
            report_time: parse_time("RATEWATCH_REPORT_TIME", "07:21")?,
            retry_time: parse_time("RATEWATCH_RETRY_TIME", "07:00")?,
            keep_alive_minutes: parse_or("RATEWATCH_KEEP_ALIVE_MINUTES", 55)?,
            report,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| RatewatchError::Config(format!("{} is not set", key)))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn flag(key: &str) -> bool {
    matches!(
        optional(key).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|err| RatewatchError::Config(format!("invalid {}: {}", key, err))),
    }
}

fn parse_time(key: &str, default: &str) -> Result<NaiveTime> {
    let raw = optional(key).unwrap_or_else(|| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map_err(|err| RatewatchError::Config(format!("invalid {} ({}): {}", key, raw, err)))
}

fn parse_boundary(raw: &str) -> Result<MonthBoundary> {
    match raw.to_ascii_lowercase().as_str() {
        "first" => Ok(MonthBoundary::FirstOfMonth),
        "last" => Ok(MonthBoundary::LastOfMonth),
        other => Err(RatewatchError::Config(format!(
            "RATEWATCH_MONTH_BOUNDARY must be \"first\" or \"last\", got \"{}\"",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boundary() {
        assert_eq!(parse_boundary("first").unwrap(), MonthBoundary::FirstOfMonth);
        assert_eq!(parse_boundary("LAST").unwrap(), MonthBoundary::LastOfMonth);
        assert!(parse_boundary("sometimes").is_err());
    }

    // Environment access is process-global, so everything env-related sits
    // in one test to avoid races with parallel test threads.
    #[test]
    fn test_from_env() {
        env::remove_var("RATEWATCH_TOKEN");
        env::remove_var("RATEWATCH_CHAT_ID");
        assert!(BotConfig::from_env().is_err());

        env::set_var("RATEWATCH_TOKEN", "secret");
        env::set_var("RATEWATCH_CHAT_ID", "ops-chat");
        env::set_var("RATEWATCH_LOOKBACK_DAYS", "9");
        env::set_var("RATEWATCH_MONTH_BOUNDARY", "first");

        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.chat_id, "ops-chat");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.min_year, DEFAULT_MIN_YEAR);
        assert_eq!(config.report.fallback.max_lookback_days, 9);
        assert_eq!(config.report.month_boundary, MonthBoundary::FirstOfMonth);
        assert_eq!(config.report_time, NaiveTime::from_hms_opt(7, 21, 0).unwrap());
        assert_eq!(config.retry_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(config.keep_alive_minutes, 55);
        assert!(config.report.skip_unchanged);

        env::set_var("RATEWATCH_REPORT_TIME", "24:99");
        assert!(BotConfig::from_env().is_err());

        env::remove_var("RATEWATCH_TOKEN");
        env::remove_var("RATEWATCH_CHAT_ID");
        env::remove_var("RATEWATCH_LOOKBACK_DAYS");
        env::remove_var("RATEWATCH_MONTH_BOUNDARY");
        env::remove_var("RATEWATCH_REPORT_TIME");
    }
}
