//! Monitor configuration.
//!
//! Everything an operator may tune lives here and is passed once, by value,
//! to the components that need it. Sensor bus addresses are wired constants
//! in the drivers — moving a device requires changing its address straps,
//! not a config file.

use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file probed at startup.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tankmon.json";

/// Core monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// I2C bus device node.
    pub bus_path: String,
    /// Append-only CSV report file.
    pub report_path: String,
    /// Minutes between report rows.
    pub interval_minutes: u32,
    /// Voltage-to-pH calibration for the analog probe.
    pub ph: PhCalibration,
    /// Reject SHT30 words whose CRC byte does not match.
    pub validate_crc: bool,
}

/// Linear calibration mapping ADC output voltage to pH.
///
/// The slope and offset are fitted against buffer solutions of known pH;
/// they are specific to one probe and one ADC board, which is why they are
/// configuration rather than driver constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhCalibration {
    /// Slope of the fitted voltage-to-pH line.
    pub slope: f64,
    /// Intercept of the fitted line (deviation compensation folded in).
    pub offset: f64,
    /// Full-scale probe output voltage.
    pub supply_voltage: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            bus_path: "/dev/i2c-1".to_string(),
            report_path: "/home/pi/tankmon/report.csv".to_string(),
            interval_minutes: 15,
            ph: PhCalibration::default(),
            validate_crc: false,
        }
    }
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self {
            slope: -19.18518519,
            offset: 41.02740741,
            supply_voltage: 3.3,
        }
    }
}

impl MonitorConfig {
    /// Parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load [`DEFAULT_CONFIG_PATH`], falling back to compiled defaults if it
    /// is missing or malformed.
    pub fn load_or_default() -> Self {
        match Self::load(DEFAULT_CONFIG_PATH) {
            Ok(cfg) => {
                info!("Config loaded from {}", DEFAULT_CONFIG_PATH);
                cfg
            }
            Err(e) => {
                warn!(
                    "Config load from {} failed ({}), using defaults",
                    DEFAULT_CONFIG_PATH, e
                );
                Self::default()
            }
        }
    }
}
