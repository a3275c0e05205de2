//! Grove pH probe read through a PCF8591 successive-approximation ADC.
//!
//! The ADC hands back the *previous* conversion with every read and starts
//! the next one, so a single exchange always yields a stale sample (the
//! very first read after power-up returns mid-scale, 0x80). Every
//! acquisition therefore performs a throwaway exchange, waits for the
//! converter to settle, and samples again — on every cycle, not just the
//! first.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::config::PhCalibration;
use crate::error::SensorError;

/// Fixed 7-bit bus address, set by the board's address-select straps.
pub const ADC_ADDR: u8 = 0x48;

/// Control + auto-increment bytes: analog channel 0, auto-increment off.
const CMD_CHANNEL0: [u8; 2] = [0x00, 0x00];

/// Settle time between the discarded exchange and the sampled one.
const SETTLE_DELAY_MS: u32 = 100;

/// One pH acquisition.
#[derive(Debug, Clone, Copy)]
pub struct PhReading {
    pub raw: u8,
    pub voltage: f64,
    pub ph: f64,
}

impl PhReading {
    /// Rendered CSV fields, one decimal place, in [`PhProbe::COLUMNS`] order.
    pub fn fields(&self) -> [String; 1] {
        [format!("{:.1}", self.ph)]
    }
}

/// Driver for the pH probe behind the PCF8591.
pub struct PhProbe {
    addr: u8,
    cal: PhCalibration,
}

impl PhProbe {
    /// Report column labels, in field order.
    pub const COLUMNS: [&'static str; 1] = ["pH"];

    pub fn new(cal: PhCalibration) -> Self {
        Self { addr: ADC_ADDR, cal }
    }

    /// Acquire one reading: discard the stale conversion, settle, sample.
    pub fn read<I2C: I2c, D: DelayNs>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
    ) -> Result<PhReading, SensorError> {
        self.sample(i2c)?;
        delay.delay_ms(SETTLE_DELAY_MS);
        let raw = self.sample(i2c)?;

        let voltage = f64::from(raw) * (self.cal.supply_voltage / 255.0);
        let ph = self.convert(raw);
        debug!("ph: raw = {}, voltage = {:.4}", raw, voltage);

        Ok(PhReading { raw, voltage, ph })
    }

    /// One ADC exchange. Four bytes come back; only the first is the
    /// channel-0 conversion.
    fn sample<I2C: I2c>(&self, i2c: &mut I2C) -> Result<u8, SensorError> {
        i2c.write(self.addr, &CMD_CHANNEL0)
            .map_err(SensorError::write)?;

        let mut buf = [0u8; 4];
        i2c.read(self.addr, &mut buf).map_err(SensorError::read)?;
        Ok(buf[0])
    }

    /// Apply the calibration line to a raw ADC byte.
    pub fn convert(&self, raw: u8) -> f64 {
        let voltage = f64::from(raw) * (self.cal.supply_voltage / 255.0);
        self.cal.slope * voltage + self.cal.offset
    }
}
