//! Packet encoding and decoding
//!
//! Packet format:
//! - START (1 byte): 0xAA marker
//! - TYPE (1 byte): command type identifier
//! - LENGTH (1 byte): payload length (0-16)
//! - PAYLOAD (0-16 bytes): command-specific data
//! - CHECKSUM (1 byte): XOR of START, TYPE, LENGTH and all PAYLOAD bytes

use heapless::Vec;

use crate::types::{CommandType, OperationalMode};

/// Packet start marker
pub const PACKET_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// START + TYPE + LENGTH
pub const HEADER_SIZE: usize = 3;

/// Smallest valid packet (header + checksum, empty payload)
pub const MIN_PACKET_SIZE: usize = HEADER_SIZE + 1;

/// Largest valid packet
pub const MAX_PACKET_SIZE: usize = MIN_PACKET_SIZE + MAX_PAYLOAD_SIZE;

/// Errors raised while building or serializing a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Payload exceeds `MAX_PAYLOAD_SIZE`
    PayloadTooLarge { len: usize },
    /// Output buffer cannot hold the serialized packet
    BufferTooSmall { needed: usize, available: usize },
}

/// Reasons a received buffer is rejected
///
/// Checks run in declaration order; the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Fewer bytes than the smallest possible packet
    BufferTooShort { len: usize },
    /// First byte is not `PACKET_START`
    InvalidStartByte(u8),
    /// Declared payload length exceeds `MAX_PAYLOAD_SIZE`
    PayloadLengthOutOfRange(u8),
    /// Buffer length differs from the length implied by the header
    LengthMismatch { expected: usize, actual: usize },
    /// Recomputed checksum disagrees with the transmitted one
    ChecksumMismatch { computed: u8, received: u8 },
}

impl DecodeError {
    /// Stable short name for the error kind
    pub fn label(&self) -> &'static str {
        match self {
            DecodeError::BufferTooShort { .. } => "buffer_too_short",
            DecodeError::InvalidStartByte(_) => "invalid_start_byte",
            DecodeError::PayloadLengthOutOfRange(_) => "payload_length_out_of_range",
            DecodeError::LengthMismatch { .. } => "length_mismatch",
            DecodeError::ChecksumMismatch { .. } => "checksum_mismatch",
        }
    }
}

/// XOR of every byte in `bytes` (0 for an empty slice)
pub fn compute_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, &byte| acc ^ byte)
}

/// A validated packet
///
/// Packets are immutable once built. Construction computes the checksum;
/// decoding stores the received checksum only after verifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    /// Raw command byte, kept verbatim so re-serialization matches the wire
    command: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    checksum: u8,
}

impl Packet {
    /// Build a packet for `command` carrying `payload`
    pub fn new(command: CommandType, payload: &[u8]) -> Result<Self, EncodeError> {
        Self::with_command_byte(command.to_byte(), payload)
    }

    /// Build a packet with no payload
    pub fn empty(command: CommandType) -> Self {
        let command = command.to_byte();
        Self {
            command,
            payload: Vec::new(),
            checksum: compute_checksum(&[PACKET_START, command, 0]),
        }
    }

    fn with_command_byte(command: u8, payload: &[u8]) -> Result<Self, EncodeError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(EncodeError::PayloadTooLarge { len: payload.len() });
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| EncodeError::PayloadTooLarge { len: payload.len() })?;

        let header = [PACKET_START, command, payload.len() as u8];
        let checksum = compute_checksum(&header) ^ compute_checksum(payload);

        Ok(Self {
            command,
            payload: payload_vec,
            checksum,
        })
    }

    /// Start marker (always `PACKET_START`)
    pub fn start_byte(&self) -> u8 {
        PACKET_START
    }

    /// Raw command byte as carried on the wire
    pub fn command_byte(&self) -> u8 {
        self.command
    }

    /// Command type; unassigned bytes read as `CommandType::Unknown`
    pub fn command_type(&self) -> CommandType {
        CommandType::from_byte(self.command)
    }

    /// Declared payload length
    pub fn payload_length(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Payload bytes (exactly `payload_length` of them)
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Integrity byte
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Serialized size in bytes
    pub fn wire_len(&self) -> usize {
        MIN_PACKET_SIZE + self.payload.len()
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let packet_len = self.wire_len();
        if buffer.len() < packet_len {
            return Err(EncodeError::BufferTooSmall {
                needed: packet_len,
                available: buffer.len(),
            });
        }

        let payload_end = HEADER_SIZE + self.payload.len();
        buffer[0] = PACKET_START;
        buffer[1] = self.command;
        buffer[2] = self.payload_length();
        buffer[HEADER_SIZE..payload_end].copy_from_slice(&self.payload);
        buffer[payload_end] = self.checksum;

        Ok(packet_len)
    }

    /// Encode this packet into a heapless Vec
    pub fn to_bytes(&self) -> Vec<u8, MAX_PACKET_SIZE> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let mut bytes = Vec::new();
        // `buffer` and `bytes` both hold the largest packet
        if let Ok(len) = self.encode(&mut buffer) {
            bytes.extend_from_slice(&buffer[..len]).ok();
        }
        bytes
    }
}

/// Build a `SetRudderAngle` packet
///
/// The angle is sent as-is; limiting it is the actuator's job.
pub fn encode_set_rudder_angle(angle: i8) -> Result<Packet, EncodeError> {
    Packet::new(CommandType::SetRudderAngle, &angle.to_le_bytes())
}

/// Build a `SetOperationalMode` packet
pub fn encode_set_operational_mode(mode: OperationalMode) -> Result<Packet, EncodeError> {
    Packet::new(CommandType::SetOperationalMode, &[mode.to_byte()])
}

/// Build a `RequestSensorData` packet
pub fn encode_request_sensor_data() -> Result<Packet, EncodeError> {
    Packet::new(CommandType::RequestSensorData, &[])
}

/// Validate and decode exactly one packet from `buffer`
pub fn decode_packet(buffer: &[u8]) -> Result<Packet, DecodeError> {
    if buffer.len() < MIN_PACKET_SIZE {
        return Err(DecodeError::BufferTooShort { len: buffer.len() });
    }

    if buffer[0] != PACKET_START {
        return Err(DecodeError::InvalidStartByte(buffer[0]));
    }

    let declared = buffer[2];
    if declared as usize > MAX_PAYLOAD_SIZE {
        return Err(DecodeError::PayloadLengthOutOfRange(declared));
    }

    let payload_end = HEADER_SIZE + declared as usize;
    let expected_len = payload_end + 1;
    if buffer.len() != expected_len {
        return Err(DecodeError::LengthMismatch {
            expected: expected_len,
            actual: buffer.len(),
        });
    }

    let mut payload = Vec::new();
    payload
        .extend_from_slice(&buffer[HEADER_SIZE..payload_end])
        .map_err(|_| DecodeError::PayloadLengthOutOfRange(declared))?;

    let computed = compute_checksum(&buffer[..payload_end]);
    let received = buffer[payload_end];
    if computed != received {
        return Err(DecodeError::ChecksumMismatch { computed, received });
    }

    Ok(Packet {
        command: buffer[1],
        payload,
        checksum: received,
    })
}
