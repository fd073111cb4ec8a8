//! Day-over-day change derivation

use serde::{Deserialize, Serialize};

use crate::types::ChangeDirection;

/// Absolute change (in rubles) at or above which a day-over-day move is
/// flagged as a jump, independent of the percentage.
pub const JUMP_THRESHOLD: f64 = 1.0;

/// Change of a rate relative to a reference rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChangeResult {
    pub delta: f64,
    /// Percentage change relative to the reference; `None` when the
    /// reference is zero.
    pub percent: Option<f64>,
    pub direction: ChangeDirection,
    pub jump: bool,
}

impl ChangeResult {
    pub fn between(current: f64, reference: f64) -> Self {
        let delta = current - reference;
        let percent = if reference == 0.0 {
            None
        } else {
            Some(delta / reference * 100.0)
        };
        let direction = if delta > 0.0 {
            ChangeDirection::Rising
        } else if delta < 0.0 {
            ChangeDirection::Falling
        } else {
            ChangeDirection::Unchanged
        };
        Self {
            delta,
            percent,
            direction,
            jump: delta.abs() >= JUMP_THRESHOLD,
        }
    }
}

/// Option-lifted form: absent when either side is absent.
pub fn change(current: Option<f64>, reference: Option<f64>) -> Option<ChangeResult> {
    match (current, reference) {
        (Some(current), Some(reference)) => Some(ChangeResult::between(current, reference)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rising_change_with_jump() {
        let c = ChangeResult::between(100.50, 99.00);
        assert_eq!(c.delta, 1.50);
        assert_relative_eq!(c.percent.unwrap(), 1.5151515, epsilon = 1e-6);
        assert_eq!(c.direction, ChangeDirection::Rising);
        assert!(c.jump);
    }

    #[test]
    fn test_unchanged_rate() {
        let c = ChangeResult::between(100.00, 100.00);
        assert_eq!(c.delta, 0.0);
        assert_eq!(c.percent, Some(0.0));
        assert_eq!(c.direction, ChangeDirection::Unchanged);
        assert!(!c.jump);
    }

    #[test]
    fn test_falling_change() {
        let c = ChangeResult::between(88.25, 88.75);
        assert_eq!(c.delta, -0.50);
        assert_eq!(c.direction, ChangeDirection::Falling);
        assert!(!c.jump);
    }

    #[test]
    fn test_zero_reference_omits_percent() {
        let c = ChangeResult::between(1.0, 0.0);
        assert_eq!(c.percent, None);
        assert!(c.jump);
    }

    #[test]
    fn test_absent_inputs() {
        assert!(change(None, Some(90.0)).is_none());
        assert!(change(Some(90.0), None).is_none());
        assert!(change(None, None).is_none());
        assert!(change(Some(90.0), Some(89.0)).is_some());
    }

    proptest! {
        #[test]
        fn direction_matches_delta_sign(
            current in 0.01f64..500.0,
            reference in 0.01f64..500.0,
        ) {
            let c = ChangeResult::between(current, reference);
            match c.direction {
                ChangeDirection::Rising => prop_assert!(c.delta > 0.0),
                ChangeDirection::Falling => prop_assert!(c.delta < 0.0),
                ChangeDirection::Unchanged => prop_assert!(c.delta == 0.0),
            }
            prop_assert_eq!(c.jump, c.delta.abs() >= JUMP_THRESHOLD);
        }
    }
}
