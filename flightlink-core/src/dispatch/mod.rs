//! Packet dispatch
//!
//! Turns raw buffers from the link into controller actions and keeps count of
//! what was accepted and rejected.

pub mod dispatcher;
pub mod stats;

pub use dispatcher::{DispatchError, Dispatcher, RX_BUF_SIZE};
pub use stats::LinkStats;
