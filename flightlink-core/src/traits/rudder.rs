//! Rudder actuator trait

/// Which limit stopped a rudder command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    Min,
    Max,
}

/// Result of commanding the rudder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RudderResponse {
    /// Angle that was asked for (degrees)
    pub requested: i8,
    /// Angle actually applied after limiting (degrees)
    pub applied: i8,
    /// Set when the request was outside the travel limits
    pub limited: Option<Limit>,
}

impl RudderResponse {
    /// Check if the applied angle differs from the request
    pub fn was_limited(&self) -> bool {
        self.limited.is_some()
    }
}

/// Trait for rudder actuators
///
/// Implementations are responsible for keeping the surface within its
/// mechanical travel; the protocol delivers angles unclamped.
pub trait RudderActuator {
    /// Move toward `target_deg`, returning what was actually applied
    fn command(&mut self, target_deg: i8) -> RudderResponse;

    /// Current angle in degrees
    fn angle(&self) -> i8;
}
