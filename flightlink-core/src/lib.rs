//! Board-agnostic flight controller logic
//!
//! This crate holds everything on the flight side of the link that does not
//! depend on specific hardware:
//!
//! - Hardware abstraction traits (rudder actuator, sensor source, link)
//! - Rudder angle limiting
//! - Sensor reading model and status flags
//! - Mode-driven control cycle
//! - Packet dispatch and link statistics
//! - Controller configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod dispatch;
pub mod rudder;
pub mod sensor;
pub mod traits;

pub use config::{ConfigError, ControllerConfig};
pub use control::{CommandOutcome, CycleReport, FlightController};
pub use dispatch::{DispatchError, Dispatcher, LinkStats};
pub use rudder::{LimitedRudder, RudderLimits};
pub use sensor::{SensorData, StatusFlags};
