//! Simulated flight sensor
//!
//! Produces readings scattered around configured base values, with random
//! status faults. Seeded, so a given config always yields the same run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use flightlink_core::traits::SensorSource;
use flightlink_core::{SensorData, StatusFlags};

use crate::config::SensorConfig;

/// Random-walk-free sensor model: each reading is independent
pub struct SimulatedSensor {
    rng: ChaCha8Rng,
    config: SensorConfig,
    initialized: bool,
}

impl SimulatedSensor {
    /// Create an uninitialised sensor
    pub fn new(config: SensorConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            initialized: false,
        }
    }

    /// Bring the sensor online
    pub fn init(&mut self) {
        self.initialized = true;
    }

    /// Check if `init` has been called
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Uniform offset in `[-spread, spread)`, or 0 for a zero spread
    fn offset(&mut self, spread: i32) -> i32 {
        if spread == 0 {
            0
        } else {
            self.rng.gen_range(-spread..spread)
        }
    }

    fn status(&mut self) -> StatusFlags {
        let mut status = StatusFlags::OK;

        if self.rng.gen_bool(self.config.low_battery_chance) {
            status.insert(StatusFlags::LOW_BATTERY);
        }
        if self.rng.gen_bool(self.config.error_chance) {
            status.insert(StatusFlags::ERROR);
            status.remove(StatusFlags::OK);
        }
        if self.rng.gen_bool(self.config.calibration_chance) {
            status.insert(StatusFlags::NEEDS_CALIBRATION);
        }

        status
    }
}

impl SensorSource for SimulatedSensor {
    fn read(&mut self) -> SensorData {
        if !self.initialized {
            return SensorData::uninitialized();
        }

        let altitude = self.offset(self.config.altitude_spread_m as i32);
        let airspeed = self.offset(self.config.airspeed_spread_kmh as i32);
        let temperature = self.offset(self.config.temperature_spread_c as i32);

        SensorData {
            altitude_m: self.config.base_altitude_m + altitude as f32,
            airspeed_kmh: (self.config.base_airspeed_kmh as i32 + airspeed)
                .clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            temperature_c: self.config.base_temperature_c + temperature as f32,
            status: self.status(),
        }
    }
}
