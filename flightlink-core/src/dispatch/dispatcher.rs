//! Command dispatcher
//!
//! decode -> typed command -> controller. Every stage reports its own error;
//! a rejected buffer leaves the controller untouched.

use flightlink_protocol::{decode_packet, Command, DecodeError, ExtractError};

use super::stats::LinkStats;
use crate::control::{CommandOutcome, FlightController};
use crate::traits::{LinkRx, RudderActuator, SensorSource};

/// Buffer size for link receive
///
/// Larger than the biggest packet so oversized buffers reach the decoder and
/// are counted as length errors instead of being silently cut.
pub const RX_BUF_SIZE: usize = 64;

/// Why a buffer was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Buffer failed packet validation
    Decode(DecodeError),
    /// Packet was valid but its payload did not match a command
    Extract(ExtractError),
}

impl From<DecodeError> for DispatchError {
    fn from(e: DecodeError) -> Self {
        DispatchError::Decode(e)
    }
}

impl From<ExtractError> for DispatchError {
    fn from(e: ExtractError) -> Self {
        DispatchError::Extract(e)
    }
}

/// Routes incoming buffers to a flight controller
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    controller: FlightController<R>,
    stats: LinkStats,
}

impl<R: RudderActuator> Dispatcher<R> {
    /// Create a dispatcher in front of `controller`
    pub fn new(controller: FlightController<R>) -> Self {
        Self {
            controller,
            stats: LinkStats::new(),
        }
    }

    /// Decode one buffer and apply the command it carries
    pub fn dispatch<S>(
        &mut self,
        buffer: &[u8],
        sensor: &mut S,
    ) -> Result<CommandOutcome, DispatchError>
    where
        S: SensorSource + ?Sized,
    {
        let packet = decode_packet(buffer).map_err(|e| {
            self.stats.record_decode_error(&e);
            e
        })?;

        let command = Command::from_packet(&packet).map_err(|e| {
            self.stats.record_extract_error();
            e
        })?;

        self.stats.record_accepted();
        Ok(self.controller.apply(command, sensor))
    }

    /// Receive at most one buffer from `link` and dispatch it
    ///
    /// Returns `Ok(None)` when the link had nothing pending.
    pub fn poll<L, S>(
        &mut self,
        link: &mut L,
        sensor: &mut S,
    ) -> Result<Option<Result<CommandOutcome, DispatchError>>, L::Error>
    where
        L: LinkRx + ?Sized,
        S: SensorSource + ?Sized,
    {
        let mut buf = [0u8; RX_BUF_SIZE];
        match link.receive(&mut buf)? {
            Some(len) => Ok(Some(self.dispatch(&buf[..len], sensor))),
            None => Ok(None),
        }
    }

    /// Controller behind this dispatcher
    pub fn controller(&self) -> &FlightController<R> {
        &self.controller
    }

    /// Mutable controller access, for running control cycles
    pub fn controller_mut(&mut self) -> &mut FlightController<R> {
        &mut self.controller
    }

    /// Packet counters so far
    pub fn stats(&self) -> &LinkStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use crate::rudder::LimitedRudder;
    use crate::sensor::{SensorData, StatusFlags};
    use crate::traits::RudderActuator;
    use flightlink_protocol::{
        encode_request_sensor_data, encode_set_operational_mode, encode_set_rudder_angle,
        CommandType, OperationalMode, Packet,
    };

    struct QuietSensor;

    impl SensorSource for QuietSensor {
        fn read(&mut self) -> SensorData {
            SensorData {
                altitude_m: 900.0,
                airspeed_kmh: 310,
                temperature_c: 12.0,
                status: StatusFlags::OK,
            }
        }
    }

    /// Link that yields queued buffers in order
    struct ScriptedLink {
        buffers: Vec<Vec<u8>>,
    }

    impl LinkRx for ScriptedLink {
        type Error = ();

        fn receive(&mut self, buf: &mut [u8]) -> Result<Option<usize>, ()> {
            if self.buffers.is_empty() {
                return Ok(None);
            }
            let next = self.buffers.remove(0);
            buf[..next.len()].copy_from_slice(&next);
            Ok(Some(next.len()))
        }
    }

    fn dispatcher() -> Dispatcher<LimitedRudder> {
        Dispatcher::new(FlightController::from_config(ControllerConfig::default()).unwrap())
    }

    #[test]
    fn test_dispatch_rudder_packet() {
        let mut dispatcher = dispatcher();
        let bytes = encode_set_rudder_angle(25).unwrap().to_bytes();

        let outcome = dispatcher.dispatch(&bytes, &mut QuietSensor).unwrap();
        assert!(matches!(outcome, CommandOutcome::RudderSet(r) if r.applied == 25));
        assert_eq!(dispatcher.controller().rudder().angle(), 25);
        assert_eq!(dispatcher.stats().accepted, 1);
    }

    #[test]
    fn test_dispatch_mode_and_request() {
        let mut dispatcher = dispatcher();

        let mode = encode_set_operational_mode(OperationalMode::ActiveFlight)
            .unwrap()
            .to_bytes();
        dispatcher.dispatch(&mode, &mut QuietSensor).unwrap();
        assert_eq!(
            dispatcher.controller().mode(),
            OperationalMode::ActiveFlight
        );

        let request = encode_request_sensor_data().unwrap().to_bytes();
        let outcome = dispatcher.dispatch(&request, &mut QuietSensor).unwrap();
        assert!(matches!(outcome, CommandOutcome::SensorReport(_)));
    }

    #[test]
    fn test_corrupt_packet_rejected_without_effect() {
        let mut dispatcher = dispatcher();
        let mut bytes = encode_set_rudder_angle(30).unwrap().to_bytes();
        bytes[3] ^= 0x01;

        let result = dispatcher.dispatch(&bytes, &mut QuietSensor);
        assert!(matches!(
            result,
            Err(DispatchError::Decode(DecodeError::ChecksumMismatch { .. }))
        ));
        assert_eq!(dispatcher.controller().rudder().angle(), 0);
        assert_eq!(dispatcher.stats().checksum_mismatch, 1);

        // Next good packet is unaffected
        let good = encode_set_rudder_angle(30).unwrap().to_bytes();
        assert!(dispatcher.dispatch(&good, &mut QuietSensor).is_ok());
        assert_eq!(dispatcher.controller().rudder().angle(), 30);
    }

    #[test]
    fn test_unknown_command_counted() {
        let mut dispatcher = dispatcher();
        let bytes = Packet::empty(CommandType::Unknown).to_bytes();

        let result = dispatcher.dispatch(&bytes, &mut QuietSensor);
        assert!(matches!(
            result,
            Err(DispatchError::Extract(ExtractError::UnknownEnumValue(0)))
        ));
        assert_eq!(dispatcher.stats().extract_failures, 1);
        assert_eq!(dispatcher.stats().accepted, 0);
    }

    #[test]
    fn test_poll_link() {
        let mut dispatcher = dispatcher();
        let mut link = ScriptedLink {
            buffers: vec![
                encode_set_rudder_angle(-20).unwrap().to_bytes().to_vec(),
                vec![0x00, 0x01],
            ],
        };

        let first = dispatcher.poll(&mut link, &mut QuietSensor).unwrap();
        assert!(matches!(first, Some(Ok(CommandOutcome::RudderSet(_)))));

        let second = dispatcher.poll(&mut link, &mut QuietSensor).unwrap();
        assert!(matches!(
            second,
            Some(Err(DispatchError::Decode(DecodeError::BufferTooShort { len: 2 })))
        ));

        assert_eq!(dispatcher.poll(&mut link, &mut QuietSensor), Ok(None));
        assert_eq!(dispatcher.stats().total(), 2);
    }
}
