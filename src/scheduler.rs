//! Polling scheduler — the two-state Idle/Polling loop.
//!
//! ```text
//!          interval expiry
//!    Idle ────────────────▶ Polling
//!     ▲                       │
//!     └───────────────────────┘
//!      row written or cycle skipped (unconditional)
//! ```
//!
//! One cycle reads every sensor and appends one row to the report. The
//! transition back to Idle is unconditional: a failed sensor costs its
//! fields, a failed report open costs the cycle's write, and neither stops
//! the loop. [`PollScheduler::run_cycle`] is the whole Polling state and is
//! callable without any real timing, so the contract is testable; only
//! [`PollScheduler::run`] sleeps.

use chrono::Local;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, info, warn};
use std::thread;
use std::time::Duration;

use crate::report::ReportWriter;
use crate::sensors::SensorHub;

/// The two scheduler states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Sleeping between cycles.
    Idle,
    /// Executing one full report row.
    Polling,
}

/// Drives the fixed-interval poll/report loop.
pub struct PollScheduler {
    interval: Duration,
    state: LoopState,
    cycles: u64,
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: LoopState::Idle,
            cycles: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Cycles executed so far, whether or not their row was written.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Execute one full Polling cycle and return to Idle.
    ///
    /// Returns `true` if a row was appended, `false` if the report write
    /// was skipped; the open is retried on the next cycle.
    pub fn run_cycle<I2C: I2c, D: DelayNs>(
        &mut self,
        hub: &mut SensorHub,
        i2c: &mut I2C,
        delay: &mut D,
        report: &ReportWriter,
    ) -> bool {
        self.state = LoopState::Polling;

        let snapshot = hub.read_all(i2c, delay);
        let written = match report.append_row(&snapshot, Local::now()) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Report file {} skipped this cycle: {}",
                    report.path().display(),
                    e
                );
                false
            }
        };

        self.state = LoopState::Idle;
        self.cycles += 1;
        written
    }

    /// Drive the loop forever: run one cycle, sleep one interval, repeat.
    /// The first row is written immediately at startup.
    pub fn run<I2C: I2c, D: DelayNs>(
        &mut self,
        hub: &mut SensorHub,
        i2c: &mut I2C,
        delay: &mut D,
        report: &ReportWriter,
    ) -> ! {
        info!(
            "Polling every {} s into {}",
            self.interval.as_secs(),
            report.path().display()
        );
        loop {
            self.run_cycle(hub, i2c, delay, report);
            debug!("Cycle {} complete, sleeping", self.cycles);
            thread::sleep(self.interval);
        }
    }
}
