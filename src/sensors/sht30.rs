//! SHT30 combined temperature/humidity sensor driver.
//!
//! Command/response exchange: write the 2-byte single-shot measurement
//! command (high repeatability), then read 6 bytes back — temperature word,
//! temperature CRC, humidity word, humidity CRC. Each CRC covers the two
//! word bytes before it (CRC-8, polynomial 0x31, init 0xFF). Checking the
//! CRCs is optional and off by default; when enabled, a mismatch fails the
//! whole acquisition.

use crc::{CRC_8_NRSC_5, Crc};
use embedded_hal::i2c::I2c;
use log::debug;

use crate::error::SensorError;

/// Fixed 7-bit bus address, set by the board's address-select jumper.
pub const SHT30_ADDR: u8 = 0x44;

/// Single-shot measurement command, high repeatability.
const CMD_MEASURE: [u8; 2] = [0x2C, 0x06];

/// Sensirion's word checksum is CRC-8 with polynomial 0x31 and init 0xFF,
/// which the crc crate catalogues as NRSC-5.
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_NRSC_5);

/// One combined temperature/humidity acquisition.
#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub humidity: f64,
}

impl ClimateReading {
    /// Convert the raw temperature and humidity words.
    ///
    /// Both fahrenheit and celsius are scaled from the raw word directly;
    /// deriving fahrenheit from the already-rounded celsius would drift by a
    /// rounding step at the output precision.
    pub fn from_raw(raw_temp: u16, raw_humidity: u16) -> Self {
        let celsius = -45.0 + 175.0 * f64::from(raw_temp) / 65536.0;
        let fahrenheit = -49.0 + 315.0 * f64::from(raw_temp) / 65536.0;
        let humidity = 100.0 * f64::from(raw_humidity) / 65536.0;
        Self {
            celsius,
            fahrenheit,
            humidity,
        }
    }

    /// Rendered CSV fields, two decimal places, humidity with a `%` suffix,
    /// in [`Sht30::COLUMNS`] order.
    pub fn fields(&self) -> [String; 3] {
        [
            format!("{:.2}", self.celsius),
            format!("{:.2}", self.fahrenheit),
            format!("{:.2}%", self.humidity),
        ]
    }
}

/// Driver for the SHT30.
pub struct Sht30 {
    addr: u8,
    validate_crc: bool,
}

impl Sht30 {
    /// Report column labels, in field order.
    pub const COLUMNS: [&'static str; 3] = ["TempC", "TempF", "Humidity"];

    pub fn new(validate_crc: bool) -> Self {
        Self {
            addr: SHT30_ADDR,
            validate_crc,
        }
    }

    /// Acquire one reading: issue the measurement command, read 6 bytes.
    pub fn read<I2C: I2c>(&self, i2c: &mut I2C) -> Result<ClimateReading, SensorError> {
        i2c.write(self.addr, &CMD_MEASURE)
            .map_err(SensorError::write)?;

        let mut buf = [0u8; 6];
        i2c.read(self.addr, &mut buf).map_err(SensorError::read)?;
        debug!("sht30: raw {:02x?}", buf);

        if self.validate_crc {
            Self::check_word(&buf[0..2], buf[2])?;
            Self::check_word(&buf[3..5], buf[5])?;
        }

        let raw_temp = u16::from_be_bytes([buf[0], buf[1]]);
        let raw_humidity = u16::from_be_bytes([buf[3], buf[4]]);
        Ok(ClimateReading::from_raw(raw_temp, raw_humidity))
    }

    fn check_word(word: &[u8], received: u8) -> Result<(), SensorError> {
        let computed = CRC8.checksum(word);
        if computed == received {
            Ok(())
        } else {
            Err(SensorError::ChecksumMismatch { computed, received })
        }
    }
}
