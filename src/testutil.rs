//! Shared test doubles for the resolver seam

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{RatewatchError, Result};
use crate::feed::RateFeed;

pub(crate) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Feed backed by a fixed live value and a date→rate map, counting every
/// fetch so tests can assert on network traffic.
pub(crate) struct MapFeed {
    live: Option<f64>,
    archive: HashMap<NaiveDate, f64>,
    calls: RefCell<u32>,
}

impl MapFeed {
    pub(crate) fn new(live: Option<f64>) -> Self {
        Self {
            live,
            archive: HashMap::new(),
            calls: RefCell::new(0),
        }
    }

    pub(crate) fn with_rate(mut self, date: NaiveDate, rate: f64) -> Self {
        self.archive.insert(date, rate);
        self
    }

    pub(crate) fn calls(&self) -> u32 {
        *self.calls.borrow()
    }
}

impl RateFeed for MapFeed {
    fn fetch_live(&self) -> Result<f64> {
        *self.calls.borrow_mut() += 1;
        self.live
            .ok_or_else(|| RatewatchError::Transport("live feed unavailable".into()))
    }

    fn fetch_archive(&self, date: NaiveDate) -> Result<f64> {
        *self.calls.borrow_mut() += 1;
        self.archive
            .get(&date)
            .copied()
            .ok_or_else(|| RatewatchError::Transport(format!("no archive entry for {}", date)))
    }
}
