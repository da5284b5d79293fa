//! Flight sensor trait

use crate::sensor::SensorData;

/// Trait for flight data sensors
///
/// Takes `&mut self` because sampling typically requires mutable access to a
/// bus or ADC. Faults are reported through the status flags of the reading
/// rather than an error value, matching what the sensor puts on the wire.
pub trait SensorSource {
    /// Take one reading
    fn read(&mut self) -> SensorData;
}
