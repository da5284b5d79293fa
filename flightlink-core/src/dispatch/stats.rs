//! Link health counters

use flightlink_protocol::DecodeError;

/// Per-outcome packet counters
///
/// Counters saturate rather than wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Packets decoded and applied
    pub accepted: u32,
    pub buffer_too_short: u32,
    pub invalid_start_byte: u32,
    pub payload_length_out_of_range: u32,
    pub length_mismatch: u32,
    pub checksum_mismatch: u32,
    /// Well-formed packets whose payload could not be interpreted
    pub extract_failures: u32,
}

impl LinkStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a packet that was decoded and applied
    pub fn record_accepted(&mut self) {
        self.accepted = self.accepted.saturating_add(1);
    }

    /// Record a packet rejected by the decoder
    pub fn record_decode_error(&mut self, error: &DecodeError) {
        let counter = match error {
            DecodeError::BufferTooShort { .. } => &mut self.buffer_too_short,
            DecodeError::InvalidStartByte(_) => &mut self.invalid_start_byte,
            DecodeError::PayloadLengthOutOfRange(_) => &mut self.payload_length_out_of_range,
            DecodeError::LengthMismatch { .. } => &mut self.length_mismatch,
            DecodeError::ChecksumMismatch { .. } => &mut self.checksum_mismatch,
        };
        *counter = counter.saturating_add(1);
    }

    /// Record a packet whose payload could not be extracted
    pub fn record_extract_error(&mut self) {
        self.extract_failures = self.extract_failures.saturating_add(1);
    }

    /// Packets rejected for any reason
    pub fn rejected(&self) -> u32 {
        self.buffer_too_short
            .saturating_add(self.invalid_start_byte)
            .saturating_add(self.payload_length_out_of_range)
            .saturating_add(self.length_mismatch)
            .saturating_add(self.checksum_mismatch)
            .saturating_add(self.extract_failures)
    }

    /// All packets seen
    pub fn total(&self) -> u32 {
        self.accepted.saturating_add(self.rejected())
    }
}
