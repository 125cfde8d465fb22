#![cfg_attr(not(test), no_std)]

pub mod measurement;
pub mod register_map;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use measurement::{AccelReading, GyroReading, RawData, Temperature};
use register_map::{pwr_mgmt_1, AccelRange, DigitalLowPassFilter, GyroRange, RegisterMap};

const I2C_ADDR_AD0_LOW: SevenBitAddress = 0b1101000;
const I2C_ADDR_AD0_HIGH: SevenBitAddress = 0b1101001;

const WHO_AM_I: u8 = 0x68;

/// Sample Rate = Gyroscope Output Rate / (1 + SMPLRT_DIV)
const SAMPLE_RATE_DIVIDER: u8 = 0x07;

const SELF_TEST_LEN: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C transaction failed.
    Bus(E),
    /// `WHO_AM_I` returned an unexpected value; carries the byte read.
    IdentityMismatch(u8),
    /// A factory self-test trim register read back as zero.
    SelfTest,
}

pub struct Mpu6050<I> {
    dev: I,
    address: SevenBitAddress,
    gyro_range: GyroRange,
    accel_range: AccelRange,
    dlpf: DigitalLowPassFilter,
    pwr_mgmt_1: u8,
}

impl<I> Mpu6050<I>
where
    I: I2c,
{
    /// Use driver with default I2C address (AD0 line low) and default ranges
    pub fn new(dev: I) -> Self {
        Self {
            dev,
            address: I2C_ADDR_AD0_LOW,
            gyro_range: GyroRange::Dps250,
            accel_range: AccelRange::G2,
            dlpf: DigitalLowPassFilter::Bw260Hz,
            pwr_mgmt_1: 0,
        }
    }

    /// AD0 line is high, adjust device I2C address accordingly
    pub fn with_ad0_line_high(self) -> Self {
        Self {
            address: I2C_ADDR_AD0_HIGH,
            ..self
        }
    }

    pub fn with_gyro_range(self, range: GyroRange) -> Self {
        Self {
            gyro_range: range,
            ..self
        }
    }

    pub fn with_accel_range(self, range: AccelRange) -> Self {
        Self {
            accel_range: range,
            ..self
        }
    }

    pub fn with_dlpf(self, dlpf: DigitalLowPassFilter) -> Self {
        Self { dlpf, ..self }
    }

    /// Release the bus handle.
    pub fn release(self) -> I {
        self.dev
    }

    /// Check `WHO_AM_I`, wake the device and program sample rate, full-scale
    /// ranges and low-pass filter, in that order.
    ///
    /// The device ignores range and filter writes while power management is
    /// at its reset defaults, so the sequence must not be reordered. The
    /// delay capability is part of the bus contract; the current sequence
    /// completes without settling waits.
    pub fn init(&mut self, _delay: &mut impl DelayNs) -> Result<(), Error<I::Error>> {
        let id = self.read_register(RegisterMap::WhoAmI)?;

        if id != WHO_AM_I {
            return Err(Error::IdentityMismatch(id));
        }

        self.write_register(RegisterMap::PwrMgmt1, 0x00)?;
        self.pwr_mgmt_1 = 0x00;

        self.write_register(RegisterMap::SmplRtDiv, SAMPLE_RATE_DIVIDER)?;
        self.write_register(RegisterMap::GyroConfig, (self.gyro_range as u8) << 3)?;
        self.write_register(RegisterMap::AccelConfig, (self.accel_range as u8) << 3)?;

        self.set_dlpf(self.dlpf)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("MPU6050 initialized");

        Ok(())
    }

    /// Reset the device and leave it awake.
    ///
    /// Not required before `init`, which assumes reset defaults.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<I::Error>> {
        self.write_register(RegisterMap::PwrMgmt1, pwr_mgmt_1::DEVICE_RESET)?;

        delay.delay_ms(100);

        self.write_register(RegisterMap::PwrMgmt1, 0x00)?;
        self.pwr_mgmt_1 = 0x00;

        Ok(())
    }

    /// Program the digital low-pass filter.
    ///
    /// Writes the filter code into `PWR_MGMT_1`, not into the DLPF_CFG bits
    /// of `CONFIG`. This mirrors the proven bring-up sequence for this board;
    /// flag for review before changing the target register.
    pub fn set_dlpf(&mut self, dlpf: DigitalLowPassFilter) -> Result<(), Error<I::Error>> {
        self.write_register(RegisterMap::PwrMgmt1, dlpf as u8)?;

        self.dlpf = dlpf;
        self.pwr_mgmt_1 = dlpf as u8;

        Ok(())
    }

    /// Coarse self-test: every factory trim register must hold a nonzero
    /// value. Does not engage the self-test excitation mode.
    pub fn self_test(&mut self) -> Result<(), Error<I::Error>> {
        let mut trim = [0; SELF_TEST_LEN];

        self.read_registers(RegisterMap::SelfTestX, &mut trim)?;

        if trim.iter().any(|&value| value < 1) {
            return Err(Error::SelfTest);
        }

        Ok(())
    }

    pub fn read_register(&mut self, register: RegisterMap) -> Result<u8, Error<I::Error>> {
        let mut buf = [0; 1];

        self.read_registers(register, &mut buf)?;

        Ok(buf[0])
    }

    pub fn read_registers(
        &mut self,
        start: RegisterMap,
        buf: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        self.dev
            .write_read(self.address, &[start as u8], buf)
            .map_err(Error::Bus)
    }

    pub fn write_register(
        &mut self,
        register: RegisterMap,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        self.dev
            .write(self.address, &[register as u8, value])
            .map_err(Error::Bus)
    }

    /// Read raw gyroscope measurement data
    pub fn read_gyro_raw(&mut self) -> Result<RawData, Error<I::Error>> {
        let mut data = [0; RawData::SIZE];

        self.read_registers(RegisterMap::GyroXOutH, &mut data)?;

        Ok(data.into())
    }

    /// Read raw accelerometer measurement data
    pub fn read_accel_raw(&mut self) -> Result<RawData, Error<I::Error>> {
        let mut data = [0; RawData::SIZE];

        self.read_registers(RegisterMap::AccelXOutH, &mut data)?;

        Ok(data.into())
    }

    /// Read raw temperature measurement data
    pub fn read_temp_raw(&mut self) -> Result<i16, Error<I::Error>> {
        let mut data = [0; Temperature::SIZE];

        self.read_registers(RegisterMap::TempOutH, &mut data)?;

        Ok(i16::from_be_bytes(data))
    }

    /// Read angular rate, scaled by the configured full-scale range into °/s
    pub fn read_gyro(&mut self) -> Result<GyroReading, Error<I::Error>> {
        let raw = self.read_gyro_raw()?;

        Ok(raw.to_gyro_reading(self.gyro_range))
    }

    /// Read acceleration, scaled by the configured full-scale range into g
    pub fn read_accel(&mut self) -> Result<AccelReading, Error<I::Error>> {
        let raw = self.read_accel_raw()?;

        Ok(raw.to_accel_reading(self.accel_range))
    }

    /// Read die temperature in °C
    pub fn read_temp(&mut self) -> Result<Temperature, Error<I::Error>> {
        let raw = self.read_temp_raw()?;

        Ok(Temperature::from_raw(raw))
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.read_register(RegisterMap::WhoAmI)
    }
}
