//! Flightlink Command Protocol
//!
//! This crate defines the binary packet format exchanged between the flight
//! controller and its command source over a byte-oriented link (UART or
//! similar). The protocol is intentionally small: one packet per buffer, a
//! bounded payload, and a single-byte integrity check.
//!
//! # Protocol Overview
//!
//! Every packet uses the same framing:
//! ```text
//! ┌───────┬──────┬────────┬─────────────┬──────────┐
//! │ START │ TYPE │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B   │ 1B     │ 0–16B       │ 1B       │
//! └───────┴──────┴────────┴─────────────┴──────────┘
//! ```
//!
//! The checksum is the XOR of every byte before it, START included.
//! Decoding validates a single complete packet; there is no stream
//! resynchronization, sequencing, or retransmission at this layer.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod packet;
pub mod types;

pub use command::{get_operational_mode, get_rudder_angle, Command, ExtractError};
pub use packet::{
    compute_checksum, decode_packet, encode_request_sensor_data, encode_set_operational_mode,
    encode_set_rudder_angle, DecodeError, EncodeError, Packet, HEADER_SIZE, MAX_PACKET_SIZE,
    MAX_PAYLOAD_SIZE, MIN_PACKET_SIZE, PACKET_START,
};
pub use types::{CommandType, OperationalMode};
