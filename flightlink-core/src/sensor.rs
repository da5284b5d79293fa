//! Flight sensor readings and status flags

/// Sensor status bit set
///
/// An empty set means no status was reported at all, which callers should
/// treat as unknown rather than healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags(u8);

impl StatusFlags {
    /// Sensor is OK
    pub const OK: Self = Self(1 << 0);
    /// Low battery warning
    pub const LOW_BATTERY: Self = Self(1 << 1);
    /// General sensor error
    pub const ERROR: Self = Self(1 << 2);
    /// Sensor needs calibration
    pub const NEEDS_CALIBRATION: Self = Self(1 << 3);

    const ALL: [(Self, &'static str); 4] = [
        (Self::OK, "OK"),
        (Self::LOW_BATTERY, "LOW_BATTERY"),
        (Self::ERROR, "ERROR"),
        (Self::NEEDS_CALIBRATION, "NEEDS_CALIBRATION"),
    ];

    const MASK: u8 = 0x0F;

    /// Empty flag set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from raw bits, dropping undefined ones
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if every flag in `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the flags in `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clear the flags in `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Check if no flags are set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `OK` set and `ERROR` clear
    pub const fn is_healthy(self) -> bool {
        self.contains(Self::OK) && !self.contains(Self::ERROR)
    }

    /// Names of the set flags, lowest bit first
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        Self::ALL
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, label)| label)
    }
}

impl core::ops::BitOr for StatusFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One reading from the flight sensor package
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorData {
    /// Altitude in meters
    pub altitude_m: f32,
    /// Airspeed in km/h
    pub airspeed_kmh: i16,
    /// Temperature in °C
    pub temperature_c: f32,
    /// Status flags
    pub status: StatusFlags,
}

impl SensorData {
    /// Reading returned before the sensor has been initialised
    pub const fn uninitialized() -> Self {
        Self {
            altitude_m: 0.0,
            airspeed_kmh: 0,
            temperature_c: 0.0,
            status: StatusFlags::ERROR,
        }
    }

    /// Check if the sensor flagged an error
    pub fn is_critical(&self) -> bool {
        self.status.contains(StatusFlags::ERROR)
    }
}
