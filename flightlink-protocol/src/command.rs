//! Typed views over packets
//!
//! The accessors re-check command type and payload length on every call, so a
//! packet handed to the wrong accessor is reported rather than misread.

use crate::packet::{
    encode_request_sensor_data, encode_set_operational_mode, encode_set_rudder_angle,
    EncodeError, Packet,
};
use crate::types::{CommandType, OperationalMode};

/// Errors from reading a typed value out of a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtractError {
    /// Packet carries a different command type
    WrongCommandType {
        expected: CommandType,
        actual: u8,
    },
    /// Payload length does not match the command type
    WrongPayloadLength { expected: u8, actual: u8 },
    /// Byte does not map to a defined enumeration value
    ///
    /// Raised for unmapped mode bytes and for packets whose command byte is
    /// `Unknown` or unassigned.
    UnknownEnumValue(u8),
}

fn expect_shape(packet: &Packet, expected: CommandType) -> Result<(), ExtractError> {
    if packet.command_byte() != expected.to_byte() {
        return Err(ExtractError::WrongCommandType {
            expected,
            actual: packet.command_byte(),
        });
    }

    let expected_len = expected.expected_payload_len().unwrap_or(0) as u8;
    if packet.payload_length() != expected_len {
        return Err(ExtractError::WrongPayloadLength {
            expected: expected_len,
            actual: packet.payload_length(),
        });
    }

    Ok(())
}

/// Read the commanded angle from a `SetRudderAngle` packet
pub fn get_rudder_angle(packet: &Packet) -> Result<i8, ExtractError> {
    expect_shape(packet, CommandType::SetRudderAngle)?;
    Ok(i8::from_le_bytes([packet.payload()[0]]))
}

/// Read the requested mode from a `SetOperationalMode` packet
pub fn get_operational_mode(packet: &Packet) -> Result<OperationalMode, ExtractError> {
    expect_shape(packet, CommandType::SetOperationalMode)?;
    OperationalMode::try_from(packet.payload()[0])
}

/// Commands carried over the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Move the rudder to an angle in degrees
    SetRudderAngle(i8),
    /// Report the current sensor reading
    RequestSensorData,
    /// Switch operational mode
    SetOperationalMode(OperationalMode),
}

impl Command {
    /// Parse a command from a decoded packet
    pub fn from_packet(packet: &Packet) -> Result<Self, ExtractError> {
        match packet.command_type() {
            CommandType::SetRudderAngle => get_rudder_angle(packet).map(Command::SetRudderAngle),
            CommandType::SetOperationalMode => {
                get_operational_mode(packet).map(Command::SetOperationalMode)
            }
            CommandType::RequestSensorData => {
                expect_shape(packet, CommandType::RequestSensorData)?;
                Ok(Command::RequestSensorData)
            }
            CommandType::Unknown => Err(ExtractError::UnknownEnumValue(packet.command_byte())),
        }
    }

    /// Encode this command into a packet
    pub fn to_packet(&self) -> Result<Packet, EncodeError> {
        match self {
            Command::SetRudderAngle(angle) => encode_set_rudder_angle(*angle),
            Command::RequestSensorData => encode_request_sensor_data(),
            Command::SetOperationalMode(mode) => encode_set_operational_mode(*mode),
        }
    }

    /// Command type tag for this command
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::SetRudderAngle(_) => CommandType::SetRudderAngle,
            Command::RequestSensorData => CommandType::RequestSensorData,
            Command::SetOperationalMode(_) => CommandType::SetOperationalMode,
        }
    }
}
