//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic and
//! whatever drives the hardware (or simulates it).

pub mod link;
pub mod rudder;
pub mod sensor;

pub use link::{LinkRx, LinkTx};
pub use rudder::{Limit, RudderActuator, RudderResponse};
pub use sensor::SensorSource;
