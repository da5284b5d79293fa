//! Rudder with mechanical travel limits

use crate::traits::{Limit, RudderActuator, RudderResponse};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default full-left travel (degrees)
pub const RUDDER_MIN_ANGLE_DEG: i8 = -45;

/// Default full-right travel (degrees)
pub const RUDDER_MAX_ANGLE_DEG: i8 = 45;

/// Rudder travel limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RudderLimits {
    /// Most negative angle (degrees)
    pub min_deg: i8,
    /// Most positive angle (degrees)
    pub max_deg: i8,
}

impl Default for RudderLimits {
    fn default() -> Self {
        Self {
            min_deg: RUDDER_MIN_ANGLE_DEG,
            max_deg: RUDDER_MAX_ANGLE_DEG,
        }
    }
}

impl RudderLimits {
    /// Check that the range is ordered and includes neutral
    pub fn is_valid(&self) -> bool {
        self.min_deg <= 0 && self.max_deg >= 0
    }

    /// Clamp `target` into this range
    pub fn clamp(&self, target: i8) -> (i8, Option<Limit>) {
        clamp_angle(target, self.min_deg, self.max_deg)
    }
}

/// Clamp `target` into `[min, max]`, reporting which limit applied
pub fn clamp_angle(target: i8, min: i8, max: i8) -> (i8, Option<Limit>) {
    if target > max {
        (max, Some(Limit::Max))
    } else if target < min {
        (min, Some(Limit::Min))
    } else {
        (target, None)
    }
}

/// Rudder that holds its last applied angle within fixed limits
#[derive(Debug, Clone)]
pub struct LimitedRudder {
    angle_deg: i8,
    limits: RudderLimits,
}

impl Default for LimitedRudder {
    fn default() -> Self {
        Self::new(0, RudderLimits::default())
    }
}

impl LimitedRudder {
    /// Create a rudder at `initial_deg`, clamped into `limits`
    pub fn new(initial_deg: i8, limits: RudderLimits) -> Self {
        let (angle_deg, _) = limits.clamp(initial_deg);
        Self { angle_deg, limits }
    }

    /// Travel limits in effect
    pub fn limits(&self) -> RudderLimits {
        self.limits
    }
}

impl RudderActuator for LimitedRudder {
    fn command(&mut self, target_deg: i8) -> RudderResponse {
        let (applied, limited) = self.limits.clamp(target_deg);
        self.angle_deg = applied;
        RudderResponse {
            requested: target_deg,
            applied,
            limited,
        }
    }

    fn angle(&self) -> i8 {
        self.angle_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_within_range() {
        assert_eq!(clamp_angle(25, -45, 45), (25, None));
        assert_eq!(clamp_angle(-45, -45, 45), (-45, None));
        assert_eq!(clamp_angle(45, -45, 45), (45, None));
    }

    #[test]
    fn test_clamp_outside_range() {
        assert_eq!(clamp_angle(46, -45, 45), (45, Some(Limit::Max)));
        assert_eq!(clamp_angle(i8::MAX, -45, 45), (45, Some(Limit::Max)));
        assert_eq!(clamp_angle(-46, -45, 45), (-45, Some(Limit::Min)));
        assert_eq!(clamp_angle(i8::MIN, -45, 45), (-45, Some(Limit::Min)));
    }

    #[test]
    fn test_initial_angle_clamped() {
        let rudder = LimitedRudder::new(90, RudderLimits::default());
        assert_eq!(rudder.angle(), 45);

        let rudder = LimitedRudder::new(-90, RudderLimits::default());
        assert_eq!(rudder.angle(), -45);
    }

    #[test]
    fn test_command_updates_angle() {
        let mut rudder = LimitedRudder::default();
        let response = rudder.command(25);

        assert_eq!(response.applied, 25);
        assert!(!response.was_limited());
        assert_eq!(rudder.angle(), 25);
    }

    #[test]
    fn test_command_limited() {
        let mut rudder = LimitedRudder::default();
        let response = rudder.command(60);

        assert_eq!(
            response,
            RudderResponse {
                requested: 60,
                applied: 45,
                limited: Some(Limit::Max),
            }
        );
        assert_eq!(rudder.angle(), 45);
    }

    #[test]
    fn test_custom_limits() {
        let limits = RudderLimits {
            min_deg: -20,
            max_deg: 30,
        };
        let mut rudder = LimitedRudder::new(0, limits);
        assert_eq!(rudder.command(-25).applied, -20);
        assert_eq!(rudder.command(31).applied, 30);
    }

    #[test]
    fn test_limits_validity() {
        assert!(RudderLimits::default().is_valid());
        assert!(!RudderLimits {
            min_deg: 5,
            max_deg: 45
        }
        .is_valid());
        assert!(!RudderLimits {
            min_deg: -45,
            max_deg: -1
        }
        .is_valid());
    }

    proptest! {
        #[test]
        fn prop_applied_within_limits(
            min in -90i8..=0,
            max in 0i8..=90,
            target in any::<i8>(),
        ) {
            let mut rudder = LimitedRudder::new(0, RudderLimits { min_deg: min, max_deg: max });
            let response = rudder.command(target);

            prop_assert!(response.applied >= min && response.applied <= max);
            prop_assert_eq!(response.limited.is_none(), response.applied == target);
        }
    }
}
