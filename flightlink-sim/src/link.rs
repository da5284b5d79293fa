//! In-process loopback link
//!
//! Stands in for the UART between ground station and flight controller.
//! Packets arrive whole and in order; a configurable fraction get a single
//! random bit flipped in transit.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use flightlink_core::traits::{LinkRx, LinkTx};

use crate::config::LinkConfig;

/// Loopback transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("received {len} bytes but receive buffer holds {capacity}")]
    Overflow { len: usize, capacity: usize },

    #[error("refusing to send an empty buffer")]
    EmptySend,
}

/// Queue-backed link with optional corruption
pub struct LoopbackLink {
    queue: VecDeque<Vec<u8>>,
    rng: ChaCha8Rng,
    corrupt_rate: f64,
    corrupted: u32,
}

impl LoopbackLink {
    /// Create a link from config
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            corrupt_rate: config.corrupt_rate,
            corrupted: 0,
        }
    }

    /// Buffers waiting to be received
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Buffers that had a bit flipped
    pub fn corrupted(&self) -> u32 {
        self.corrupted
    }
}

impl LinkTx for LoopbackLink {
    type Error = LinkError;

    fn send(&mut self, packet: &[u8]) -> Result<(), LinkError> {
        if packet.is_empty() {
            return Err(LinkError::EmptySend);
        }

        let mut bytes = packet.to_vec();
        if self.corrupt_rate > 0.0 && self.rng.gen_bool(self.corrupt_rate) {
            let index = self.rng.gen_range(0..bytes.len());
            let bit = self.rng.gen_range(0..8);
            bytes[index] ^= 1 << bit;
            self.corrupted += 1;
        }

        self.queue.push_back(bytes);
        Ok(())
    }
}

impl LinkRx for LoopbackLink {
    type Error = LinkError;

    fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, LinkError> {
        let Some(bytes) = self.queue.pop_front() else {
            return Ok(None);
        };

        if bytes.len() > buf.len() {
            return Err(LinkError::Overflow {
                len: bytes.len(),
                capacity: buf.len(),
            });
        }

        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(Some(bytes.len()))
    }
}
