//! Flight control
//!
//! Applies decoded commands and runs the mode-dependent control cycle.

pub mod controller;
pub mod report;

pub use controller::FlightController;
pub use report::{CommandOutcome, CycleReport};
