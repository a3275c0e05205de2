//! Full poll-cycle tests: scheduler → hub → drivers → report file.

use std::path::PathBuf;
use std::time::Duration;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use tankmon::config::MonitorConfig;
use tankmon::report::ReportWriter;
use tankmon::scheduler::{LoopState, PollScheduler};
use tankmon::sensors::SensorHub;

use crate::mock_bus::{Outcome, healthy_cycle_script, mock_pair};

const ADDR_NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

fn report_path(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tankmon-{}-{}.csv", tag, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn scheduler() -> PollScheduler {
    PollScheduler::new(Duration::from_secs(900))
}

fn hub() -> SensorHub {
    SensorHub::new(&MonitorConfig::default())
}

fn healthy_script() -> Vec<Outcome> {
    healthy_cycle_script(
        [0x19, 0x00],
        0x80,
        128,
        [0x66, 0x66, 0x00, 0x80, 0x00, 0x00],
    )
}

#[test]
fn one_cycle_writes_header_and_row() {
    let path = report_path("one-cycle");
    let (mut bus, mut delay, _log) = mock_pair(healthy_script());
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new(&path);

    let written = sched.run_cycle(&mut hub, &mut bus, &mut delay, &report);
    assert!(written);
    assert_eq!(sched.state(), LoopState::Idle);
    assert_eq!(sched.cycles_completed(), 1);
    assert_eq!(bus.remaining(), 0, "every scripted exchange was issued");

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Date,Time,epoch,PCT_C,PCT_F,pH,TempC,TempF,Humidity");

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 9);
    assert_eq!(
        &fields[3..],
        &["25.0", "77.0", "9.2", "25.00", "77.00", "50.00%"][..]
    );
    fields[2].parse::<i64>().expect("epoch must be an integer");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn second_cycle_appends_without_second_header() {
    let path = report_path("two-cycles");
    let mut script = healthy_script();
    script.extend(healthy_script());
    let (mut bus, mut delay, _log) = mock_pair(script);
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new(&path);

    assert!(sched.run_cycle(&mut hub, &mut bus, &mut delay, &report));
    assert!(sched.run_cycle(&mut hub, &mut bus, &mut delay, &report));

    let text = std::fs::read_to_string(&path).unwrap();
    let headers = text.lines().filter(|l| l.starts_with("Date,")).count();
    assert_eq!(headers, 1);
    assert_eq!(text.lines().count(), 3);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn one_failed_sensor_blanks_only_its_own_columns() {
    let path = report_path("pct-down");
    // PCT2075 rejected at address selection; the other two proceed.
    let mut script: Vec<Outcome> = vec![Err(ADDR_NACK)];
    script.extend(vec![
        Ok(vec![]),
        Ok(vec![0x80, 0, 0, 0]),
        Ok(vec![]),
        Ok(vec![128, 0, 0, 0]),
        Ok(vec![]),
        Ok(vec![0x66, 0x66, 0x00, 0x80, 0x00, 0x00]),
    ]);
    let (mut bus, mut delay, _log) = mock_pair(script);
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new(&path);

    let written = sched.run_cycle(&mut hub, &mut bus, &mut delay, &report);
    assert!(written, "a sensor failure must not cost the row");

    let text = std::fs::read_to_string(&path).unwrap();
    let row = text.lines().nth(1).unwrap();
    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields.len(), 9, "column count holds with a sensor down");
    assert_eq!(fields[3], "");
    assert_eq!(fields[4], "");
    assert_eq!(fields[5], "9.2");
    assert_eq!(fields[6], "25.00");
    assert_eq!(fields[8], "50.00%");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn every_sensor_down_still_produces_a_timestamped_row() {
    let path = report_path("all-down");
    // Each driver's first write fails; no further exchanges are attempted.
    let (mut bus, mut delay, _log) =
        mock_pair(vec![Err(ADDR_NACK), Err(ADDR_NACK), Err(ADDR_NACK)]);
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new(&path);

    let written = sched.run_cycle(&mut hub, &mut bus, &mut delay, &report);
    assert!(written);
    assert_eq!(bus.remaining(), 0);

    let text = std::fs::read_to_string(&path).unwrap();
    let row = text.lines().nth(1).unwrap();
    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields.len(), 9);
    assert!(fields[3..].iter().all(|f| f.is_empty()));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unwritable_report_skips_the_cycle_but_not_the_loop() {
    let (mut bus, mut delay, _log) = mock_pair(healthy_script());
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new("/nonexistent-dir/tankmon/report.csv");

    let written = sched.run_cycle(&mut hub, &mut bus, &mut delay, &report);
    assert!(!written, "open failure skips the write");
    assert_eq!(sched.state(), LoopState::Idle, "the loop still returns to Idle");
    assert_eq!(sched.cycles_completed(), 1);
}

#[test]
fn cycle_count_advances_across_mixed_outcomes() {
    let path = report_path("mixed");
    let mut script = healthy_script();
    script.extend(vec![Err(ADDR_NACK), Err(ADDR_NACK), Err(ADDR_NACK)]);
    let (mut bus, mut delay, _log) = mock_pair(script);
    let mut hub = hub();
    let mut sched = scheduler();
    let report = ReportWriter::new(&path);

    assert!(sched.run_cycle(&mut hub, &mut bus, &mut delay, &report));
    assert!(sched.run_cycle(&mut hub, &mut bus, &mut delay, &report));
    assert_eq!(sched.cycles_completed(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3, "header plus one row per cycle");

    std::fs::remove_file(&path).unwrap();
}
