//! Sensor-level error taxonomy.
//!
//! Every acquisition failure funnels into [`SensorError`]. The hub logs it
//! and carries on — a failed sensor costs its own columns for one cycle and
//! nothing else. All variants are `Copy` so they pass through the polling
//! loop without allocation.

use core::fmt;
use embedded_hal::i2c::{Error as I2cError, ErrorKind, NoAcknowledgeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device did not acknowledge its bus address.
    AddressNack,
    /// The command write was rejected or truncated.
    WriteFailed(ErrorKind),
    /// The data read was rejected or truncated.
    ReadFailed(ErrorKind),
    /// A received word failed its CRC check (strict mode only).
    ChecksumMismatch { computed: u8, received: u8 },
}

impl SensorError {
    /// Classify a failed command write.
    pub fn write<E: I2cError>(e: E) -> Self {
        match e.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Self::AddressNack,
            kind => Self::WriteFailed(kind),
        }
    }

    /// Classify a failed data read.
    pub fn read<E: I2cError>(e: E) -> Self {
        match e.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Self::AddressNack,
            kind => Self::ReadFailed(kind),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressNack => write!(f, "device did not acknowledge its address"),
            Self::WriteFailed(kind) => write!(f, "command write failed: {kind}"),
            Self::ReadFailed(kind) => write!(f, "data read failed: {kind}"),
            Self::ChecksumMismatch { computed, received } => {
                write!(
                    f,
                    "CRC mismatch: computed {computed:#04x}, received {received:#04x}"
                )
            }
        }
    }
}
