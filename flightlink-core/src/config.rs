//! Controller configuration
//!
//! All tunables for the flight side of the link. Defaults reproduce the
//! stock behaviour; hosts may load overrides through the `serde` feature.

use flightlink_protocol::OperationalMode;

use crate::rudder::RudderLimits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Above this airspeed the controller steers a negative correction
pub const DEFAULT_HIGH_AIRSPEED_KMH: i16 = 350;

/// Below this airspeed the controller steers a positive correction
pub const DEFAULT_LOW_AIRSPEED_KMH: i16 = 250;

/// Rudder correction applied outside the airspeed band (degrees)
pub const DEFAULT_CORRECTION_DEG: i8 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rudder limits do not bracket neutral
    InvalidRudderLimits,
    /// Low airspeed threshold is not below the high one
    InvalidAirspeedBand,
    /// Correction angle is negative or outside the rudder limits
    InvalidCorrection,
}

/// Flight controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerConfig {
    /// Rudder travel limits
    pub rudder_limits: RudderLimits,
    /// Rudder angle at startup (degrees, clamped into limits)
    pub initial_rudder_deg: i8,
    /// Mode at startup
    pub initial_mode: OperationalMode,
    /// Upper edge of the nominal airspeed band (km/h)
    pub high_airspeed_kmh: i16,
    /// Lower edge of the nominal airspeed band (km/h)
    pub low_airspeed_kmh: i16,
    /// Correction magnitude outside the band (degrees)
    pub correction_deg: i8,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            rudder_limits: RudderLimits::default(),
            initial_rudder_deg: 0,
            initial_mode: OperationalMode::Standby,
            high_airspeed_kmh: DEFAULT_HIGH_AIRSPEED_KMH,
            low_airspeed_kmh: DEFAULT_LOW_AIRSPEED_KMH,
            correction_deg: DEFAULT_CORRECTION_DEG,
        }
    }
}

impl ControllerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rudder_limits.is_valid() {
            return Err(ConfigError::InvalidRudderLimits);
        }

        if self.low_airspeed_kmh >= self.high_airspeed_kmh {
            return Err(ConfigError::InvalidAirspeedBand);
        }

        if self.correction_deg < 0
            || self.correction_deg > self.rudder_limits.max_deg
            || -self.correction_deg < self.rudder_limits.min_deg
        {
            return Err(ConfigError::InvalidCorrection);
        }

        Ok(())
    }
}
