use crate::register_map::{AccelRange, GyroRange};

/// Raw big-endian 3-axis sample as it sits in the output registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) z: i16,
}

impl RawData {
    pub const SIZE: usize = 6;

    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        self.z
    }

    /// Scale by the configured gyro sensitivity into °/s.
    pub fn to_gyro_reading(self, range: GyroRange) -> GyroReading {
        let sensitivity = range.lsb_per_dps();

        GyroReading {
            x: self.x as f32 / sensitivity,
            y: self.y as f32 / sensitivity,
            z: self.z as f32 / sensitivity,
        }
    }

    /// Scale by the configured accel sensitivity into g.
    pub fn to_accel_reading(self, range: AccelRange) -> AccelReading {
        let sensitivity = range.lsb_per_g();

        AccelReading {
            x: self.x as f32 / sensitivity,
            y: self.y as f32 / sensitivity,
            z: self.z as f32 / sensitivity,
        }
    }
}

impl From<[u8; Self::SIZE]> for RawData {
    fn from(value: [u8; Self::SIZE]) -> Self {
        Self {
            x: i16::from_be_bytes([value[0], value[1]]),
            y: i16::from_be_bytes([value[2], value[3]]),
            z: i16::from_be_bytes([value[4], value[5]]),
        }
    }
}

/// Angular rate in °/s per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroReading {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Acceleration in g per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelReading {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Die temperature in °C.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    pub celsius: f32,
}

impl Temperature {
    pub(crate) const SIZE: usize = 2;

    /// Datasheet linear formula for the raw temperature register value.
    pub fn from_raw(raw: i16) -> Self {
        Self {
            celsius: raw as f32 / 340.0 + 36.53,
        }
    }
}
