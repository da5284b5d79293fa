//! Simulation configuration
//!
//! Loaded from TOML. Every section and field is optional; anything omitted
//! takes the default, which matches the embedded `sim.toml`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use flightlink_core::ControllerConfig;
use flightlink_protocol::{Command, OperationalMode};

use crate::error::{Result, SimError};

/// Default configuration compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../sim.toml");

/// Top-level simulation config
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub controller: ControllerConfig,
    pub sensor: SensorConfig,
    pub link: LinkConfig,
    pub run: RunConfig,
}

/// Simulated sensor behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// RNG seed, so runs are reproducible
    pub seed: u64,
    pub base_altitude_m: f32,
    /// Readings vary over `base ± spread`
    pub altitude_spread_m: u16,
    pub base_airspeed_kmh: i16,
    pub airspeed_spread_kmh: i16,
    pub base_temperature_c: f32,
    pub temperature_spread_c: u16,
    /// Probability per reading of a low battery warning
    pub low_battery_chance: f64,
    /// Probability per reading of a sensor error (clears OK)
    pub error_chance: f64,
    /// Probability per reading of a calibration request
    pub calibration_chance: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            base_altitude_m: 1000.0,
            altitude_spread_m: 250,
            base_airspeed_kmh: 300,
            airspeed_spread_kmh: 50,
            base_temperature_c: 15.0,
            temperature_spread_c: 10,
            low_battery_chance: 0.10,
            error_chance: 0.05,
            calibration_chance: 0.20,
        }
    }
}

/// Loopback link behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// RNG seed for corruption decisions
    pub seed: u64,
    /// Probability that a sent packet has one bit flipped
    pub corrupt_rate: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            corrupt_rate: 0.0,
        }
    }
}

/// What the ground station sends and how long the controller runs
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Control cycles to run after the command script
    pub cycles: u32,
    /// Commands sent over the link, in order
    pub commands: Vec<ScriptedCommand>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cycles: 3,
            commands: vec![
                ScriptedCommand::RudderAngle { angle: 25 },
                ScriptedCommand::OperationalMode {
                    mode: OperationalMode::ActiveFlight,
                },
                ScriptedCommand::RequestSensorData,
            ],
        }
    }
}

/// One command in the run script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptedCommand {
    RudderAngle { angle: i8 },
    OperationalMode { mode: OperationalMode },
    RequestSensorData,
}

impl From<ScriptedCommand> for Command {
    fn from(cmd: ScriptedCommand) -> Self {
        match cmd {
            ScriptedCommand::RudderAngle { angle } => Command::SetRudderAngle(angle),
            ScriptedCommand::OperationalMode { mode } => Command::SetOperationalMode(mode),
            ScriptedCommand::RequestSensorData => Command::RequestSensorData,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.controller.validate()?;

        let chances = [
            ("sensor.low_battery_chance", self.sensor.low_battery_chance),
            ("sensor.error_chance", self.sensor.error_chance),
            ("sensor.calibration_chance", self.sensor.calibration_chance),
            ("link.corrupt_rate", self.link.corrupt_rate),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::Config(format!(
                    "{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }

        if self.sensor.airspeed_spread_kmh < 0 {
            return Err(SimError::Config(
                "sensor.airspeed_spread_kmh must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightlink_core::rudder::RudderLimits;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let embedded = SimConfig::embedded().unwrap();
        let defaults = SimConfig::default();

        assert_eq!(embedded.controller, defaults.controller);
        assert_eq!(embedded.sensor.seed, defaults.sensor.seed);
        assert_eq!(embedded.link.corrupt_rate, defaults.link.corrupt_rate);
        assert_eq!(embedded.run.cycles, defaults.run.cycles);
        assert_eq!(embedded.run.commands, defaults.run.commands);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config.controller, ControllerConfig::default());
        assert_eq!(config.run.commands.len(), 3);
    }

    #[test]
    fn test_partial_override() {
        let config = SimConfig::from_toml_str(
            r#"
            [controller]
            initial_mode = "diagnostic"

            [controller.rudder_limits]
            min_deg = -30
            max_deg = 30

            [run]
            cycles = 10
            commands = [{ kind = "rudder_angle", angle = -5 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.controller.initial_mode, OperationalMode::Diagnostic);
        assert_eq!(
            config.controller.rudder_limits,
            RudderLimits {
                min_deg: -30,
                max_deg: 30
            }
        );
        assert_eq!(config.controller.correction_deg, 10);
        assert_eq!(config.run.cycles, 10);
        assert_eq!(
            config.run.commands,
            vec![ScriptedCommand::RudderAngle { angle: -5 }]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SimConfig::from_toml_str("[link]\nloss_rate = 0.5\n");
        assert!(matches!(result, Err(SimError::Toml(_))));
    }

    #[test]
    fn test_controller_typo_rejected() {
        let result = SimConfig::from_toml_str("[controller]\ncorection_deg = 30\n");
        assert!(matches!(result, Err(SimError::Toml(_))));

        let result =
            SimConfig::from_toml_str("[controller.rudder_limits]\nmax_degrees = 30\n");
        assert!(matches!(result, Err(SimError::Toml(_))));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = SimConfig::from_toml_str(
            "[run]\ncommands = [{ kind = \"operational_mode\", mode = \"cruise\" }]\n",
        );
        assert!(matches!(result, Err(SimError::Toml(_))));
    }

    #[test]
    fn test_probability_out_of_range() {
        let result = SimConfig::from_toml_str("[link]\ncorrupt_rate = 1.5\n");
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn test_invalid_controller_rejected() {
        let result = SimConfig::from_toml_str(
            "[controller]\nhigh_airspeed_kmh = 100\nlow_airspeed_kmh = 200\n",
        );
        assert!(matches!(result, Err(SimError::Controller(_))));
    }

    #[test]
    fn test_scripted_command_conversion() {
        assert_eq!(
            Command::from(ScriptedCommand::RudderAngle { angle: 12 }),
            Command::SetRudderAngle(12)
        );
        assert_eq!(
            Command::from(ScriptedCommand::RequestSensorData),
            Command::RequestSensorData
        );
    }
}
