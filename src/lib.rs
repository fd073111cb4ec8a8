//! # ratewatch
//!
//! Daily exchange-rate reporting engine: resolves the ruble rate of a
//! single tracked currency from the CBR daily-JSON feed, derives
//! day-over-day change and monthly aggregates, and delivers formatted chat
//! reports with a single-slot retry store for failed sends.
//!
//! The rate feed, the message sender and the current date are all injected,
//! so every path runs deterministically under test.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use ratewatch::prelude::*;
//!
//! struct FixedFeed(f64);
//!
//! impl RateFeed for FixedFeed {
//!     fn fetch_live(&self) -> Result<f64> {
//!         Ok(self.0)
//!     }
//!     fn fetch_archive(&self, _date: NaiveDate) -> Result<f64> {
//!         Ok(self.0 - 0.5)
//!     }
//! }
//!
//! struct StdoutSender;
//!
//! impl ReportSender for StdoutSender {
//!     fn send(&self, text: &str) -> Result<()> {
//!         println!("{}", text);
//!         Ok(())
//!     }
//! }
//!
//! let resolver = RateResolver::new(FixedFeed(90.1234));
//! let retry = RetryStore::new("last_failed_message.txt");
//! let mut service =
//!     ReportService::new(resolver, StdoutSender, retry, ReportConfig::default());
//!
//! let today = NaiveDate::from_ymd_opt(2025, 8, 28).unwrap();
//! service.daily_report(today);
//! ```

pub mod cache;
pub mod change;
pub mod config;
pub mod error;
pub mod fallback;
pub mod feed;
pub mod monthly;
#[cfg(feature = "net")]
pub mod net;
pub mod report;
pub mod resolver;
pub mod retry;
pub mod schedule;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::cache::RateCache;
    pub use crate::change::{change, ChangeResult, JUMP_THRESHOLD};
    pub use crate::error::{RatewatchError, Result};
    pub use crate::fallback::{previous_available, FallbackPolicy};
    pub use crate::feed::RateFeed;
    pub use crate::monthly::{monthly_stats, LastRatePolicy, MonthlyStats};
    pub use crate::report::{MonthBoundary, ReportConfig, ReportSender, ReportService};
    pub use crate::resolver::RateResolver;
    pub use crate::retry::RetryStore;
    pub use crate::types::{round4, ChangeDirection, Trend};
}
