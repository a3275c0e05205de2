//! Tank monitor — main entry point.
//!
//! Wires the real Linux I2C transport to the sensor hub, report writer, and
//! polling scheduler. All policy lives in the library; this binary only
//! assembles the pieces.

use anyhow::{Context, Result};
use linux_embedded_hal::{Delay, I2cdev};
use log::info;
use std::time::Duration;

use tankmon::config::MonitorConfig;
use tankmon::report::ReportWriter;
use tankmon::scheduler::PollScheduler;
use tankmon::sensors::SensorHub;

fn main() -> Result<()> {
    env_logger::init();

    info!("tankmon v{}", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::load_or_default();
    info!(
        "Reporting every {} min to {}",
        config.interval_minutes, config.report_path
    );

    // The bus is the one resource the monitor cannot run without; anything
    // downstream of here is a per-cycle problem, not a startup one.
    let mut i2c = I2cdev::new(&config.bus_path)
        .with_context(|| format!("opening I2C bus {}", config.bus_path))?;
    let mut delay = Delay;

    let mut hub = SensorHub::new(&config);
    let report = ReportWriter::new(&config.report_path);
    let interval = Duration::from_secs(u64::from(config.interval_minutes) * 60);
    let mut scheduler = PollScheduler::new(interval);

    scheduler.run(&mut hub, &mut i2c, &mut delay, &report)
}
