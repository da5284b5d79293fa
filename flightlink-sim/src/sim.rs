//! Ground station / flight controller simulation
//!
//! The ground side encodes the scripted commands and sends them over the
//! loopback link. The flight side polls the link, dispatches whatever
//! arrives, then runs the configured number of control cycles.

use tracing::{debug, info, warn};

use flightlink_core::traits::{LinkTx, RudderActuator};
use flightlink_core::{
    CommandOutcome, CycleReport, DispatchError, Dispatcher, FlightController, LimitedRudder,
    LinkStats, SensorData,
};
use flightlink_protocol::{Command, OperationalMode};

use crate::config::SimConfig;
use crate::error::Result;
use crate::link::LoopbackLink;
use crate::sensor::SimulatedSensor;

/// End state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSummary {
    pub stats: LinkStats,
    pub mode: OperationalMode,
    pub rudder_deg: i8,
    /// Packets the link corrupted in transit
    pub corrupted: u32,
    /// Cycles that reported a critical condition
    pub critical_cycles: u32,
}

pub struct Simulation {
    dispatcher: Dispatcher<LimitedRudder>,
    sensor: SimulatedSensor,
    link: LoopbackLink,
    config: SimConfig,
}

impl Simulation {
    /// Build all components from a validated config
    pub fn new(config: SimConfig) -> Result<Self> {
        let controller = FlightController::from_config(config.controller)?;
        let mut sensor = SimulatedSensor::new(config.sensor.clone());
        sensor.init();

        Ok(Self {
            dispatcher: Dispatcher::new(controller),
            sensor,
            link: LoopbackLink::new(&config.link),
            config,
        })
    }

    /// Send the command script, then run the control cycles
    pub fn run(mut self) -> Result<SimSummary> {
        info!(
            mode = self.dispatcher.controller().mode().name(),
            commands = self.config.run.commands.len(),
            cycles = self.config.run.cycles,
            "Starting simulation"
        );

        let commands: Vec<Command> = self
            .config
            .run
            .commands
            .iter()
            .map(|&cmd| cmd.into())
            .collect();
        for command in commands {
            self.transmit(command)?;
            self.receive()?;
        }

        let mut critical_cycles = 0u32;
        for cycle in 1..=self.config.run.cycles {
            let report = self.dispatcher.controller_mut().cycle(&mut self.sensor);
            log_cycle(cycle, &report);
            if report.is_critical() {
                critical_cycles += 1;
            }
        }

        let stats = *self.dispatcher.stats();
        log_stats(&stats);

        Ok(SimSummary {
            stats,
            mode: self.dispatcher.controller().mode(),
            rudder_deg: self.dispatcher.controller().rudder().angle(),
            corrupted: self.link.corrupted(),
            critical_cycles,
        })
    }

    fn transmit(&mut self, command: Command) -> Result<()> {
        let packet = command.to_packet()?;
        let bytes = packet.to_bytes();
        debug!(
            command = ?command,
            bytes = %hex(&bytes),
            "Sending packet"
        );
        self.link.send(&bytes)?;
        Ok(())
    }

    /// Drain everything pending on the link
    fn receive(&mut self) -> Result<()> {
        while let Some(result) = self.dispatcher.poll(&mut self.link, &mut self.sensor)? {
            match result {
                Ok(outcome) => log_outcome(&outcome),
                Err(DispatchError::Decode(e)) => {
                    warn!(reason = e.label(), error = ?e, "Packet rejected")
                }
                Err(DispatchError::Extract(e)) => {
                    warn!(error = ?e, "Command rejected")
                }
            }
        }
        Ok(())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn flag_list(reading: &SensorData) -> String {
    reading.status.labels().collect::<Vec<_>>().join("|")
}

fn log_outcome(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::RudderSet(response) => {
            if let Some(limit) = response.limited {
                warn!(
                    requested = response.requested,
                    applied = response.applied,
                    limit = ?limit,
                    "Rudder angle limited"
                );
            } else {
                info!(angle = response.applied, "Rudder set");
            }
        }
        CommandOutcome::ModeChanged { from, to } => {
            info!(from = from.name(), to = to.name(), "Operational mode changed");
        }
        CommandOutcome::SensorReport(reading) => {
            info!(
                altitude_m = reading.altitude_m,
                airspeed_kmh = reading.airspeed_kmh,
                temperature_c = reading.temperature_c,
                status = %flag_list(reading),
                "Sensor data"
            );
        }
    }
}

fn log_cycle(cycle: u32, report: &CycleReport) {
    match report {
        CycleReport::Active {
            reading,
            rudder,
            critical,
        } => {
            info!(
                cycle,
                airspeed_kmh = reading.airspeed_kmh,
                altitude_m = reading.altitude_m,
                rudder = rudder.applied,
                status = %flag_list(reading),
                "Active flight cycle"
            );
            if *critical {
                warn!(cycle, "Sensor error during active flight");
            }
        }
        CycleReport::Standby { rudder_deg } => {
            info!(cycle, rudder = rudder_deg, "Standby, rudder held");
        }
        CycleReport::Diagnostic {
            reading,
            sensor_healthy,
            needs_calibration,
            rudder_deg,
        } => {
            info!(
                cycle,
                healthy = sensor_healthy,
                needs_calibration,
                rudder = rudder_deg,
                status = %flag_list(reading),
                "Diagnostic cycle"
            );
            if !sensor_healthy {
                warn!(cycle, "Sensor failed self-test");
            }
        }
    }
}

fn log_stats(stats: &LinkStats) {
    info!(
        total = stats.total(),
        accepted = stats.accepted,
        rejected = stats.rejected(),
        "Link statistics"
    );
    if stats.rejected() > 0 {
        warn!(
            buffer_too_short = stats.buffer_too_short,
            invalid_start_byte = stats.invalid_start_byte,
            payload_length_out_of_range = stats.payload_length_out_of_range,
            length_mismatch = stats.length_mismatch,
            checksum_mismatch = stats.checksum_mismatch,
            extract_failures = stats.extract_failures,
            "Rejected packets by reason"
        );
    }
}
