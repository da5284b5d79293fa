//! Results produced by the flight controller

use flightlink_protocol::OperationalMode;

use crate::sensor::SensorData;
use crate::traits::RudderResponse;

/// Effect of applying one command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Rudder moved (possibly limited)
    RudderSet(RudderResponse),
    /// Operational mode switched
    ModeChanged {
        from: OperationalMode,
        to: OperationalMode,
    },
    /// Sensor sampled on request
    SensorReport(SensorData),
}

/// What one control cycle did
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleReport {
    /// Closed-loop cycle in active flight
    Active {
        reading: SensorData,
        rudder: RudderResponse,
        /// Sensor reported an error this cycle
        critical: bool,
    },
    /// Sensors idle, rudder held
    Standby { rudder_deg: i8 },
    /// Sensor self-test
    Diagnostic {
        reading: SensorData,
        sensor_healthy: bool,
        needs_calibration: bool,
        rudder_deg: i8,
    },
}

impl CycleReport {
    /// Mode the cycle ran in
    pub fn mode(&self) -> OperationalMode {
        match self {
            CycleReport::Active { .. } => OperationalMode::ActiveFlight,
            CycleReport::Standby { .. } => OperationalMode::Standby,
            CycleReport::Diagnostic { .. } => OperationalMode::Diagnostic,
        }
    }

    /// Check if the cycle needs operator attention
    pub fn is_critical(&self) -> bool {
        match self {
            CycleReport::Active { critical, .. } => *critical,
            CycleReport::Diagnostic { sensor_healthy, .. } => !sensor_healthy,
            CycleReport::Standby { .. } => false,
        }
    }
}
