//! Packet link abstractions
//!
//! The link carries whole packets: each receive yields at most one complete
//! buffer. Byte-stream framing and retransmission live below this seam.

/// Link transmitter
pub trait LinkTx {
    /// Error type for transmit operations
    type Error;

    /// Send one serialized packet
    fn send(&mut self, packet: &[u8]) -> Result<(), Self::Error>;
}

/// Link receiver
pub trait LinkRx {
    /// Error type for receive operations
    type Error;

    /// Receive one buffer into `buf`
    ///
    /// Returns `Ok(None)` when nothing is pending, or `Ok(Some(len))` with the
    /// number of bytes written.
    fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;
}
