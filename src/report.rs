//! CSV report assembly — header emission and durable row appends.
//!
//! The report is an append-only CSV whose column schema is fixed for the
//! file's lifetime: `Date,Time,epoch` followed by each driver's columns in
//! hub order. The header is written exactly when the file is empty at open
//! time; a pre-existing report picked up after a restart never gets a
//! second header. A sensor that failed its cycle contributes one empty
//! field per column, so the column count never wavers.

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::sensors::SensorSnapshot;
use crate::sensors::pct2075::Pct2075;
use crate::sensors::ph::PhProbe;
use crate::sensors::sht30::Sht30;

/// Writes timestamped rows to the report file.
///
/// The file is opened, appended, synced, and closed within each call — no
/// handle survives between cycles, so killing the process mid-sleep leaves
/// a complete file behind.
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one report row, emitting the header first if the file is
    /// empty.
    ///
    /// Header and row are staged in memory and written with a single
    /// `write_all`, then synced, so an external reader tailing the file
    /// never observes a partial row between cycles.
    pub fn append_row(&self, snapshot: &SensorSnapshot, now: DateTime<Local>) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // The write position straight after open tells whether the file is
        // empty; an explicit first-run flag would mis-handle pre-existing
        // report files.
        let offset = file.seek(SeekFrom::End(0))?;

        let mut out = String::new();
        if offset == 0 {
            out.push_str(&header_line());
        }
        out.push_str(&row_line(snapshot, now));

        file.write_all(out.as_bytes())?;
        file.sync_data()
    }
}

/// The header row: `Date,Time,epoch` plus every driver's columns, in the
/// same order [`row_line`] renders fields.
pub fn header_line() -> String {
    let mut cols: Vec<&str> = vec!["Date", "Time", "epoch"];
    cols.extend(Pct2075::COLUMNS);
    cols.extend(PhProbe::COLUMNS);
    cols.extend(Sht30::COLUMNS);
    let mut line = cols.join(",");
    line.push('\n');
    line
}

/// Render one report row: timestamp fields, then each driver's formatted
/// fields in hub order, empty fields standing in for a failed sensor.
pub fn row_line(snapshot: &SensorSnapshot, now: DateTime<Local>) -> String {
    let mut fields: Vec<String> = vec![
        now.format("%m/%d/%Y").to_string(),
        now.format("%H:%M:%S").to_string(),
        now.timestamp().to_string(),
    ];

    extend_or_blank(&mut fields, snapshot.temperature.map(|r| r.fields()));
    extend_or_blank(&mut fields, snapshot.ph.map(|r| r.fields()));
    extend_or_blank(&mut fields, snapshot.climate.map(|r| r.fields()));

    let mut line = fields.join(",");
    line.push('\n');
    line
}

fn extend_or_blank<const N: usize>(fields: &mut Vec<String>, rendered: Option<[String; N]>) {
    match rendered {
        Some(vals) => fields.extend(vals),
        None => fields.extend(std::iter::repeat_with(String::new).take(N)),
    }
}
