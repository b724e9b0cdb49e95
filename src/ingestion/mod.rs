// ABOUTME: Loads semicolon-delimited workout exports into WorkoutSet records
// ABOUTME: Drops rows with bad dates or set numbers and coerces unparseable numbers to missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Export Ingestion
//!
//! The export has a header row `Date;Time;Routine;Exercise;Set;Weight;Reps;Duration;Distance`.
//! Header names are matched case-insensitively and `Time`, `Routine`,
//! `Weight`, `Reps`, `Duration` and `Distance` may be absent.

/// Explicit cache of loaded exports keyed by path and modification time
pub mod cache;

pub use cache::WorkoutDataCache;

use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use liftlog_core::constants::ingestion::{CSV_DELIMITER, DATE_FORMAT};
use liftlog_core::errors::{AppError, AppResult};
use liftlog_core::models::WorkoutSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    time: Option<usize>,
    routine: Option<usize>,
    exercise: usize,
    set: usize,
    weight: Option<usize>,
    reps: Option<usize>,
    duration: Option<usize>,
    distance: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> AppResult<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                AppError::invalid_format(format!("workout export is missing the '{name}' column"))
            })
        };

        Ok(Self {
            date: require("date")?,
            time: find("time"),
            routine: find("routine"),
            exercise: require("exercise")?,
            set: require("set")?,
            weight: find("weight"),
            reps: find("reps"),
            duration: find("duration"),
            distance: find("distance"),
        })
    }
}

/// Field text at an optional column, `None` when absent or blank
fn field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Finite real number, otherwise missing
fn parse_number(text: Option<&str>) -> Option<f64> {
    text.and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Non-negative whole number, otherwise missing
// Safe: range and integrality checked first
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(text: Option<&str>) -> Option<u32> {
    parse_number(text)
        .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
}

/// `HH:MM:SS` or `HH:MM`
fn parse_time(text: Option<&str>) -> Option<NaiveTime> {
    let text = text?;
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Reads workout exports with the `csv` crate
#[derive(Debug, Clone, Copy)]
pub struct CsvWorkoutLoader {
    delimiter: u8,
}

impl Default for CsvWorkoutLoader {
    fn default() -> Self {
        Self {
            delimiter: CSV_DELIMITER,
        }
    }
}

impl CsvWorkoutLoader {
    /// Loader for the default `;`-delimited export
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load every valid set from an export file
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or lacks
    /// a required header column
    pub fn load_path(&self, path: &Path) -> AppResult<Vec<WorkoutSet>> {
        if !path.exists() {
            return Err(AppError::not_found(format!(
                "workout export {}",
                path.display()
            )));
        }
        let sets = self.load_reader(File::open(path)?)?;
        info!(path = %path.display(), sets = sets.len(), "loaded workout export");
        Ok(sets)
    }

    /// Load every valid set from any reader over export text
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read or lacks a required column
    pub fn load_reader<R: Read>(&self, reader: R) -> AppResult<Vec<WorkoutSet>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| {
            AppError::invalid_format(format!("unreadable workout export header: {e}"))
                .with_source(e)
        })?;
        let columns = Columns::from_headers(headers)?;

        let mut sets = Vec::new();
        let mut dropped = 0_usize;
        for (index, result) in csv_reader.records().enumerate() {
            let row = index + 2;
            let record = match result {
                Ok(record) => record,
                Err(error) => {
                    warn!(row, error = %error, "dropping unreadable row");
                    dropped += 1;
                    continue;
                }
            };
            match Self::parse_record(&record, columns, row) {
                Some(set) => sets.push(set),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            info!(kept = sets.len(), dropped, "workout export parsed with dropped rows");
        }
        Ok(sets)
    }

    fn parse_record(record: &StringRecord, columns: Columns, row: usize) -> Option<WorkoutSet> {
        let date_text = field(record, Some(columns.date)).unwrap_or_default();
        let Ok(date) = NaiveDate::parse_from_str(date_text, DATE_FORMAT) else {
            warn!(row, value = date_text, "dropping row with unparseable date");
            return None;
        };

        let set_text = field(record, Some(columns.set));
        let Some(set_number) = parse_count(set_text).filter(|n| *n > 0) else {
            warn!(
                row,
                value = set_text.unwrap_or_default(),
                "dropping row with invalid set number"
            );
            return None;
        };

        Some(WorkoutSet {
            date,
            time: parse_time(field(record, columns.time)),
            routine: field(record, columns.routine).unwrap_or_default().to_owned(),
            exercise: field(record, Some(columns.exercise))
                .unwrap_or_default()
                .to_owned(),
            set_number,
            weight: parse_number(field(record, columns.weight)),
            reps: parse_count(field(record, columns.reps)),
            duration: parse_number(field(record, columns.duration)),
            distance: parse_number(field(record, columns.distance)),
        })
    }
}
