#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterMap {
    SelfTestX = 0x0D,
    SelfTestY = 0x0E,
    SelfTestZ = 0x0F,
    SelfTestA = 0x10,
    SmplRtDiv = 0x19,
    Config = 0x1A,
    GyroConfig = 0x1B,
    AccelConfig = 0x1C,
    AccelXOutH = 0x3B,
    TempOutH = 0x41,
    GyroXOutH = 0x43,
    PwrMgmt1 = 0x6B,
    PwrMgmt2 = 0x6C,
    WhoAmI = 0x75,
}

/// `PWR_MGMT_1` bit fields.
pub mod pwr_mgmt_1 {
    pub const DEVICE_RESET: u8 = 1 << 7;
    pub const SLEEP: u8 = 1 << 6;
    pub const CYCLE: u8 = 1 << 5;
    pub const TEMP_DIS: u8 = 1 << 0;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    Dps250 = 0b00,
    Dps500 = 0b01,
    Dps1000 = 0b10,
    Dps2000 = 0b11,
}

impl GyroRange {
    /// Sensitivity in LSB per °/s for this full-scale range.
    pub fn lsb_per_dps(self) -> f32 {
        match self {
            Self::Dps250 => 131.0,
            Self::Dps500 => 65.5,
            Self::Dps1000 => 32.8,
            Self::Dps2000 => 16.4,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    G2 = 0b00,
    G4 = 0b01,
    G8 = 0b10,
    G16 = 0b11,
}

impl AccelRange {
    /// Sensitivity in LSB per g for this full-scale range.
    pub fn lsb_per_g(self) -> f32 {
        match self {
            Self::G2 => 16384.0,
            Self::G4 => 8192.0,
            Self::G8 => 4096.0,
            Self::G16 => 2048.0,
        }
    }
}

/// Gyroscope bandwidths selectable through the DLPF_CFG field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitalLowPassFilter {
    Bw260Hz = 0,
    Bw184Hz = 1,
    Bw94Hz = 2,
    Bw44Hz = 3,
    Bw21Hz = 4,
    Bw10Hz = 5,
    Bw5Hz = 6,
}
