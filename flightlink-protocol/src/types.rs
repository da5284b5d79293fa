//! Wire-level enumerations carried in packets

use crate::command::ExtractError;

// Command type values (packet byte 1)
const CMD_UNKNOWN: u8 = 0x00;
const CMD_SET_RUDDER_ANGLE: u8 = 0x01;
const CMD_REQUEST_SENSOR_DATA: u8 = 0x02;
const CMD_SET_OPERATIONAL_MODE: u8 = 0x03;

// Operational mode values (payload byte of SetOperationalMode)
const MODE_STANDBY: u8 = 0x00;
const MODE_ACTIVE_FLIGHT: u8 = 0x01;
const MODE_DIAGNOSTIC: u8 = 0x02;

/// Identifies how a packet's payload is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandType {
    /// Unassigned or unrecognized command
    Unknown,
    /// Command the rudder to an angle (payload: one signed byte, degrees)
    SetRudderAngle,
    /// Ask for a sensor reading (no payload)
    RequestSensorData,
    /// Switch the system operational mode (payload: one mode byte)
    SetOperationalMode,
}

impl CommandType {
    /// Convert a raw command byte, mapping unassigned values to `Unknown`
    ///
    /// This never fails; use `CommandType::try_from` when an unassigned
    /// value must be reported instead.
    pub fn from_byte(byte: u8) -> Self {
        Self::try_from(byte).unwrap_or(CommandType::Unknown)
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            CommandType::Unknown => CMD_UNKNOWN,
            CommandType::SetRudderAngle => CMD_SET_RUDDER_ANGLE,
            CommandType::RequestSensorData => CMD_REQUEST_SENSOR_DATA,
            CommandType::SetOperationalMode => CMD_SET_OPERATIONAL_MODE,
        }
    }

    /// Payload length this command type requires, if it is fixed
    pub fn expected_payload_len(self) -> Option<usize> {
        match self {
            CommandType::SetRudderAngle | CommandType::SetOperationalMode => Some(1),
            CommandType::RequestSensorData => Some(0),
            CommandType::Unknown => None,
        }
    }
}

impl TryFrom<u8> for CommandType {
    type Error = ExtractError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            CMD_UNKNOWN => Ok(CommandType::Unknown),
            CMD_SET_RUDDER_ANGLE => Ok(CommandType::SetRudderAngle),
            CMD_REQUEST_SENSOR_DATA => Ok(CommandType::RequestSensorData),
            CMD_SET_OPERATIONAL_MODE => Ok(CommandType::SetOperationalMode),
            other => Err(ExtractError::UnknownEnumValue(other)),
        }
    }
}

/// System operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OperationalMode {
    /// Sensors idle, rudder held
    #[default]
    Standby,
    /// Closed-loop control from sensor readings
    ActiveFlight,
    /// Self-test
    Diagnostic,
}

impl OperationalMode {
    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            OperationalMode::Standby => MODE_STANDBY,
            OperationalMode::ActiveFlight => MODE_ACTIVE_FLIGHT,
            OperationalMode::Diagnostic => MODE_DIAGNOSTIC,
        }
    }

    /// Short lowercase name, used in logs
    pub fn name(self) -> &'static str {
        match self {
            OperationalMode::Standby => "standby",
            OperationalMode::ActiveFlight => "active_flight",
            OperationalMode::Diagnostic => "diagnostic",
        }
    }
}

impl TryFrom<u8> for OperationalMode {
    type Error = ExtractError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            MODE_STANDBY => Ok(OperationalMode::Standby),
            MODE_ACTIVE_FLIGHT => Ok(OperationalMode::ActiveFlight),
            MODE_DIAGNOSTIC => Ok(OperationalMode::Diagnostic),
            other => Err(ExtractError::UnknownEnumValue(other)),
        }
    }
}
