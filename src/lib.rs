//! Tank environment monitor library.
//!
//! Three I2C sensors — a PCT2075 thermometer, a Grove pH probe behind a
//! PCF8591 ADC, and an SHT30 temperature/humidity sensor — are polled on a
//! fixed interval and their readings appended as one timestamped CSV row
//! per cycle.
//!
//! Everything here is hardware-agnostic: the drivers are generic over
//! `embedded_hal::i2c::I2c` and `embedded_hal::delay::DelayNs`, so tests
//! substitute a scripted fake bus. The real Linux transport lives in the
//! binary, behind the `hardware` feature.

#![deny(unused_must_use)]

pub mod config;
pub mod report;
pub mod scheduler;
pub mod sensors;

mod error;
pub use error::SensorError;
