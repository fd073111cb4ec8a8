//! Shared value types and rate arithmetic helpers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round a rate to the 4-decimal precision published by the upstream feed.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Month-over-month direction of a rate series, compared first vs last
/// element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl Trend {
    pub fn of(first: f64, last: f64) -> Trend {
        if last > first {
            Trend::Rising
        } else if last < first {
            Trend::Falling
        } else {
            Trend::Flat
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Rising => "📈 rising",
            Trend::Falling => "📉 falling",
            Trend::Flat => "⏸ flat",
        };
        write!(f, "{}", s)
    }
}

/// Sign classification of a day-over-day change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDirection {
    Rising,
    Falling,
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(90.123449), 90.1234);
        assert_eq!(round4(90.12345), 90.1235);
        assert_eq!(round4(90.0), 90.0);
    }

    #[test]
    fn test_trend_of() {
        assert_eq!(Trend::of(80.0, 81.0), Trend::Rising);
        assert_eq!(Trend::of(81.0, 80.0), Trend::Falling);
        assert_eq!(Trend::of(80.0, 80.0), Trend::Flat);
    }

    #[test]
    fn test_trend_display() {
        assert!(Trend::Rising.to_string().contains("rising"));
        assert!(Trend::Flat.to_string().contains("flat"));
    }
}
