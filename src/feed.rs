//! Rate source capability

use crate::error::Result;
use chrono::NaiveDate;

/// Capability for fetching the tracked currency's rate from the upstream
/// source.
///
/// A missing archive day, a non-success response or a transport failure all
/// surface as an `Err`; the resolver downgrades every error to "absent" and
/// logs it, so implementations never need to distinguish the cases beyond
/// the error message.
pub trait RateFeed {
    /// Fetch today's published rate.
    fn fetch_live(&self) -> Result<f64>;

    /// Fetch the archived rate for an exact calendar date.
    fn fetch_archive(&self, date: NaiveDate) -> Result<f64>;
}
