//! PCT2075 digital temperature sensor driver.
//!
//! Pointer-register protocol: write the one-byte register pointer (0x00,
//! the temperature register), then read two bytes back. The raw word is
//! big-endian, MSB first.

use embedded_hal::i2c::I2c;
use log::debug;

use crate::error::SensorError;

/// Fixed 7-bit bus address, set by the board's address-select straps.
pub const PCT2075_ADDR: u8 = 0x37;

/// Pointer value selecting the temperature data register.
const REG_TEMP: u8 = 0x00;

/// One temperature acquisition.
#[derive(Debug, Clone, Copy)]
pub struct TempReading {
    pub raw: u16,
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl TempReading {
    /// Convert the 16-bit register word.
    ///
    /// The /256 scaling matches the observed device output rather than the
    /// datasheet's 11-bit, 0.125 C/LSB encoding.
    pub fn from_raw(raw: u16) -> Self {
        let celsius = f64::from(raw) / 256.0;
        let fahrenheit = celsius * 9.0 / 5.0 + 32.0;
        Self {
            raw,
            celsius,
            fahrenheit,
        }
    }

    /// Rendered CSV fields, one decimal place, in [`Pct2075::COLUMNS`] order.
    pub fn fields(&self) -> [String; 2] {
        [
            format!("{:.1}", self.celsius),
            format!("{:.1}", self.fahrenheit),
        ]
    }
}

/// Driver for the PCT2075.
pub struct Pct2075 {
    addr: u8,
}

impl Pct2075 {
    /// Report column labels, in field order.
    pub const COLUMNS: [&'static str; 2] = ["PCT_C", "PCT_F"];

    pub fn new() -> Self {
        Self { addr: PCT2075_ADDR }
    }

    /// Acquire one reading: point at the temperature register, read 2 bytes.
    pub fn read<I2C: I2c>(&self, i2c: &mut I2C) -> Result<TempReading, SensorError> {
        i2c.write(self.addr, &[REG_TEMP])
            .map_err(SensorError::write)?;

        let mut buf = [0u8; 2];
        i2c.read(self.addr, &mut buf).map_err(SensorError::read)?;
        debug!("pct2075: raw {:#04x} {:#04x}", buf[0], buf[1]);

        Ok(TempReading::from_raw(u16::from_be_bytes(buf)))
    }
}

impl Default for Pct2075 {
    fn default() -> Self {
        Self::new()
    }
}
