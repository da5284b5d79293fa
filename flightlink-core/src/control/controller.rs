//! Flight controller
//!
//! All rudder and sensor activity is a function of the current operational
//! mode and either a command or a cycle tick.

use flightlink_protocol::{Command, OperationalMode};

use super::report::{CommandOutcome, CycleReport};
use crate::config::{ConfigError, ControllerConfig};
use crate::rudder::LimitedRudder;
use crate::sensor::StatusFlags;
use crate::traits::{RudderActuator, SensorSource};

/// Mode-driven controller for one rudder
#[derive(Debug, Clone)]
pub struct FlightController<R> {
    rudder: R,
    mode: OperationalMode,
    config: ControllerConfig,
}

impl FlightController<LimitedRudder> {
    /// Build a controller with a `LimitedRudder` from a validated config
    pub fn from_config(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rudder = LimitedRudder::new(config.initial_rudder_deg, config.rudder_limits);
        Ok(Self::new(rudder, config))
    }
}

impl<R: RudderActuator> FlightController<R> {
    /// Create a controller around an existing actuator
    ///
    /// The config is taken as-is; call `ControllerConfig::validate` first if
    /// it comes from an untrusted source.
    pub fn new(rudder: R, config: ControllerConfig) -> Self {
        Self {
            rudder,
            mode: config.initial_mode,
            config,
        }
    }

    /// Current operational mode
    pub fn mode(&self) -> OperationalMode {
        self.mode
    }

    /// Rudder actuator
    pub fn rudder(&self) -> &R {
        &self.rudder
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Apply one decoded command
    pub fn apply<S>(&mut self, command: Command, sensor: &mut S) -> CommandOutcome
    where
        S: SensorSource + ?Sized,
    {
        match command {
            Command::SetRudderAngle(angle) => CommandOutcome::RudderSet(self.rudder.command(angle)),
            Command::SetOperationalMode(mode) => {
                let from = self.mode;
                self.mode = mode;
                CommandOutcome::ModeChanged { from, to: mode }
            }
            Command::RequestSensorData => CommandOutcome::SensorReport(sensor.read()),
        }
    }

    /// Rudder target for a given airspeed
    pub fn correction_for(&self, airspeed_kmh: i16) -> i8 {
        if airspeed_kmh > self.config.high_airspeed_kmh {
            self.config.correction_deg.saturating_neg()
        } else if airspeed_kmh < self.config.low_airspeed_kmh {
            self.config.correction_deg
        } else {
            0
        }
    }

    /// Run one control cycle in the current mode
    pub fn cycle<S>(&mut self, sensor: &mut S) -> CycleReport
    where
        S: SensorSource + ?Sized,
    {
        match self.mode {
            OperationalMode::ActiveFlight => {
                let reading = sensor.read();
                let target = self.correction_for(reading.airspeed_kmh);
                let rudder = self.rudder.command(target);
                CycleReport::Active {
                    reading,
                    rudder,
                    critical: reading.is_critical(),
                }
            }
            OperationalMode::Standby => CycleReport::Standby {
                rudder_deg: self.rudder.angle(),
            },
            OperationalMode::Diagnostic => {
                let reading = sensor.read();
                CycleReport::Diagnostic {
                    reading,
                    sensor_healthy: reading.status.is_healthy(),
                    needs_calibration: reading.status.contains(StatusFlags::NEEDS_CALIBRATION),
                    rudder_deg: self.rudder.angle(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rudder::RudderLimits;
    use crate::sensor::SensorData;
    use crate::traits::Limit;

    /// Sensor returning a fixed reading and counting samples
    struct FixedSensor {
        reading: SensorData,
        reads: usize,
    }

    impl FixedSensor {
        fn with_airspeed(airspeed_kmh: i16) -> Self {
            Self {
                reading: SensorData {
                    altitude_m: 1000.0,
                    airspeed_kmh,
                    temperature_c: 15.0,
                    status: StatusFlags::OK,
                },
                reads: 0,
            }
        }
    }

    impl SensorSource for FixedSensor {
        fn read(&mut self) -> SensorData {
            self.reads += 1;
            self.reading
        }
    }

    fn active_controller() -> FlightController<LimitedRudder> {
        let config = ControllerConfig {
            initial_mode: OperationalMode::ActiveFlight,
            ..Default::default()
        };
        FlightController::from_config(config).unwrap()
    }

    #[test]
    fn test_starts_in_standby() {
        let controller = FlightController::from_config(ControllerConfig::default()).unwrap();
        assert_eq!(controller.mode(), OperationalMode::Standby);
        assert_eq!(controller.rudder().angle(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ControllerConfig {
            low_airspeed_kmh: 400,
            ..Default::default()
        };
        assert!(matches!(
            FlightController::from_config(config),
            Err(ConfigError::InvalidAirspeedBand)
        ));
    }

    #[test]
    fn test_apply_rudder_command() {
        let mut controller = FlightController::from_config(ControllerConfig::default()).unwrap();
        let mut sensor = FixedSensor::with_airspeed(300);

        let outcome = controller.apply(Command::SetRudderAngle(25), &mut sensor);
        assert!(matches!(
            outcome,
            CommandOutcome::RudderSet(r) if r.applied == 25 && r.limited.is_none()
        ));
        assert_eq!(controller.rudder().angle(), 25);

        let outcome = controller.apply(Command::SetRudderAngle(-100), &mut sensor);
        assert!(matches!(
            outcome,
            CommandOutcome::RudderSet(r) if r.applied == -45 && r.limited == Some(Limit::Min)
        ));
        assert_eq!(sensor.reads, 0);
    }

    #[test]
    fn test_apply_mode_command() {
        let mut controller = FlightController::from_config(ControllerConfig::default()).unwrap();
        let mut sensor = FixedSensor::with_airspeed(300);

        let outcome = controller.apply(
            Command::SetOperationalMode(OperationalMode::ActiveFlight),
            &mut sensor,
        );
        assert_eq!(
            outcome,
            CommandOutcome::ModeChanged {
                from: OperationalMode::Standby,
                to: OperationalMode::ActiveFlight,
            }
        );
        assert_eq!(controller.mode(), OperationalMode::ActiveFlight);
    }

    #[test]
    fn test_apply_sensor_request() {
        let mut controller = FlightController::from_config(ControllerConfig::default()).unwrap();
        let mut sensor = FixedSensor::with_airspeed(280);

        let outcome = controller.apply(Command::RequestSensorData, &mut sensor);
        assert!(matches!(
            outcome,
            CommandOutcome::SensorReport(data) if data.airspeed_kmh == 280
        ));
        assert_eq!(sensor.reads, 1);
    }

    #[test]
    fn test_correction_thresholds() {
        let controller = active_controller();
        assert_eq!(controller.correction_for(351), -10);
        assert_eq!(controller.correction_for(350), 0);
        assert_eq!(controller.correction_for(300), 0);
        assert_eq!(controller.correction_for(250), 0);
        assert_eq!(controller.correction_for(249), 10);
    }

    #[test]
    fn test_active_cycle_steers() {
        let mut controller = active_controller();

        let mut fast = FixedSensor::with_airspeed(380);
        let report = controller.cycle(&mut fast);
        assert!(matches!(
            report,
            CycleReport::Active { rudder, critical: false, .. } if rudder.applied == -10
        ));
        assert_eq!(controller.rudder().angle(), -10);

        let mut slow = FixedSensor::with_airspeed(200);
        controller.cycle(&mut slow);
        assert_eq!(controller.rudder().angle(), 10);

        let mut nominal = FixedSensor::with_airspeed(300);
        controller.cycle(&mut nominal);
        assert_eq!(controller.rudder().angle(), 0);
    }

    #[test]
    fn test_active_cycle_flags_sensor_error() {
        let mut controller = active_controller();
        let mut sensor = FixedSensor::with_airspeed(300);
        sensor.reading.status = StatusFlags::ERROR;

        let report = controller.cycle(&mut sensor);
        assert!(report.is_critical());
    }

    #[test]
    fn test_standby_holds_rudder() {
        let mut controller = FlightController::from_config(ControllerConfig::default()).unwrap();
        let mut sensor = FixedSensor::with_airspeed(400);
        controller.apply(Command::SetRudderAngle(20), &mut sensor);

        let report = controller.cycle(&mut sensor);
        assert_eq!(report, CycleReport::Standby { rudder_deg: 20 });
        assert_eq!(sensor.reads, 0);
    }

    #[test]
    fn test_diagnostic_cycle() {
        let config = ControllerConfig {
            initial_mode: OperationalMode::Diagnostic,
            ..Default::default()
        };
        let mut controller = FlightController::from_config(config).unwrap();
        let mut sensor = FixedSensor::with_airspeed(300);
        sensor.reading.status = StatusFlags::OK | StatusFlags::NEEDS_CALIBRATION;

        let report = controller.cycle(&mut sensor);
        assert!(matches!(
            report,
            CycleReport::Diagnostic {
                sensor_healthy: true,
                needs_calibration: true,
                rudder_deg: 0,
                ..
            }
        ));
        assert_eq!(report.mode(), OperationalMode::Diagnostic);
        assert!(!report.is_critical());
    }

    #[test]
    fn test_custom_limits_apply_to_cycle() {
        let config = ControllerConfig {
            initial_mode: OperationalMode::ActiveFlight,
            rudder_limits: RudderLimits {
                min_deg: -45,
                max_deg: 45,
            },
            correction_deg: 30,
            ..Default::default()
        };
        let mut controller = FlightController::from_config(config).unwrap();
        let mut slow = FixedSensor::with_airspeed(100);

        controller.cycle(&mut slow);
        assert_eq!(controller.rudder().angle(), 30);
    }

    #[test]
    fn test_extreme_correction_saturates() {
        // `new` takes the config unvalidated
        let config = ControllerConfig {
            correction_deg: i8::MIN,
            ..Default::default()
        };
        let controller = FlightController::new(LimitedRudder::default(), config);

        assert_eq!(controller.correction_for(400), i8::MAX);
        assert_eq!(controller.correction_for(100), i8::MIN);
    }
}
