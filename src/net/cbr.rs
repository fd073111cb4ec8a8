//! CBR daily-JSON rate feed
//!
//! Live rates come from `{base}/daily_json.js`, archival rates from
//! `{base}/archive/{year}/{month}/{day}/daily_json.js`. The payload carries
//! every quoted currency under `Valute`; only the tracked one is extracted.

use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{RatewatchError, Result};
use crate::feed::RateFeed;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct DailyQuotes {
    #[serde(rename = "Valute")]
    valute: HashMap<String, Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "Value")]
    value: f64,
}

/// Blocking client for the CBR daily-JSON mirror.
pub struct CbrFeed {
    client: Client,
    base_url: String,
    currency_code: String,
}

impl CbrFeed {
    pub fn new(base_url: impl Into<String>, currency_code: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|err| {
                RatewatchError::Transport(format!("failed to build HTTP client: {}", err))
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            currency_code: currency_code.into(),
        })
    }

    fn fetch(&self, url: &str) -> Result<f64> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RatewatchError::Transport(format!("GET {} failed: {}", url, err)))?;

        if !response.status().is_success() {
            return Err(RatewatchError::Transport(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let quotes: DailyQuotes = response.json().map_err(|err| {
            RatewatchError::Payload(format!("malformed payload from {}: {}", url, err))
        })?;

        quotes
            .valute
            .get(&self.currency_code)
            .map(|quote| quote.value)
            .ok_or_else(|| {
                RatewatchError::Payload(format!(
                    "{} missing from payload of {}",
                    self.currency_code, url
                ))
            })
    }
}

impl RateFeed for CbrFeed {
    fn fetch_live(&self) -> Result<f64> {
        self.fetch(&format!("{}/daily_json.js", self.base_url))
    }

    fn fetch_archive(&self, date: NaiveDate) -> Result<f64> {
        self.fetch(&format!(
            "{}/archive/{}/{:02}/{:02}/daily_json.js",
            self.base_url,
            date.year(),
            date.month(),
            date.day()
        ))
    }
}
