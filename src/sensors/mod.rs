//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns the three drivers and reads them in report order each
//! cycle. Every driver speaks its own wire protocol and owns its own
//! raw-to-physical conversion; the hub only sequences them and absorbs
//! per-driver failures.

pub mod pct2075;
pub mod ph;
pub mod sht30;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::config::MonitorConfig;
use pct2075::{Pct2075, TempReading};
use ph::{PhProbe, PhReading};
use sht30::{ClimateReading, Sht30};

/// One cycle's readings, in report order. `None` marks a sensor whose
/// acquisition failed this cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    pub temperature: Option<TempReading>,
    pub ph: Option<PhReading>,
    pub climate: Option<ClimateReading>,
}

/// Aggregates the three sensor drivers.
pub struct SensorHub {
    temperature: Pct2075,
    ph: PhProbe,
    climate: Sht30,
}

impl SensorHub {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            temperature: Pct2075::new(),
            ph: PhProbe::new(config.ph),
            climate: Sht30::new(config.validate_crc),
        }
    }

    /// Read every sensor and return the cycle's snapshot.
    ///
    /// A failing sensor is logged and recorded as `None`; the bus moves on
    /// to the next device. One bad exchange never costs the other sensors
    /// their readings.
    pub fn read_all<I2C: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I2C,
        delay: &mut D,
    ) -> SensorSnapshot {
        let temperature = match self.temperature.read(i2c) {
            Ok(r) => {
                info!("pct2075: {:.1} C, {:.1} F", r.celsius, r.fahrenheit);
                Some(r)
            }
            Err(e) => {
                warn!("pct2075: {}", e);
                None
            }
        };

        let ph = match self.ph.read(i2c, delay) {
            Ok(r) => {
                info!("ph: {:.1}", r.ph);
                Some(r)
            }
            Err(e) => {
                warn!("ph: {}", e);
                None
            }
        };

        let climate = match self.climate.read(i2c) {
            Ok(r) => {
                info!(
                    "sht30: {:.2} C, {:.2} F, humidity {:.2}%",
                    r.celsius, r.fahrenheit, r.humidity
                );
                Some(r)
            }
            Err(e) => {
                warn!("sht30: {}", e);
                None
            }
        };

        SensorSnapshot {
            temperature,
            ph,
            climate,
        }
    }
}
