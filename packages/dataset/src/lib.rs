#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Incident record loader for the SF crime dashboard.
//!
//! Reads the raw SFPD incident export (CSV), renames the source columns to
//! the canonical field names, coerces types, and drops rows that are
//! missing required values or carry out-of-range coordinates. The result
//! is a [`NormalizedDataset`] built once at process start and treated as
//! immutable by everything downstream.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike as _, NaiveDateTime, Timelike as _};
use sf_crime_dataset_models::{DayOfWeek, IncidentRecord, NormalizedDataset};
use thiserror::Error;

/// Errors that can occur while loading the incident dataset.
///
/// All of these are fatal at startup: the server must not begin serving
/// requests without a dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The source file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required source column is absent from the header row, so the
    /// corresponding canonical field would be entirely unpopulated.
    #[error("required column '{column}' missing from source header")]
    MissingColumn {
        /// The missing source column label.
        column: &'static str,
    },
}

/// Source column labels in the SFPD incident export, in the order the
/// loader binds them. Unrecognized source columns are ignored.
const COL_DATETIME: &str = "Incident Datetime";
const COL_DAY_OF_WEEK: &str = "Incident Day of Week";
const COL_CATEGORY: &str = "Incident Category";
const COL_DISTRICT: &str = "Police District";
const COL_LATITUDE: &str = "Latitude";
const COL_LONGITUDE: &str = "Longitude";

/// Column indexes resolved from the source header row.
struct ColumnIndexes {
    datetime: usize,
    day_of_week: usize,
    category: usize,
    district: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndexes {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(DataLoadError::MissingColumn { column })
        };

        Ok(Self {
            datetime: find(COL_DATETIME)?,
            day_of_week: find(COL_DAY_OF_WEEK)?,
            category: find(COL_CATEGORY)?,
            district: find(COL_DISTRICT)?,
            latitude: find(COL_LATITUDE)?,
            longitude: find(COL_LONGITUDE)?,
        })
    }
}

/// Parses an incident datetime string.
///
/// The SFPD export writes `2023/03/15 03:45:00 PM`; ISO 8601 variants are
/// accepted as well since re-exports of the same dataset use them.
#[must_use]
pub fn parse_incident_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y/%m/%d %I:%M:%S %p") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    None
}

/// Normalizes one raw row into an [`IncidentRecord`].
///
/// Returns `None` when any required value is missing, unparseable, or
/// out of range; such rows are dropped rather than treated as errors.
#[allow(clippy::cast_possible_truncation)]
fn normalize_row(record: &csv::StringRecord, cols: &ColumnIndexes) -> Option<IncidentRecord> {
    let field = |idx: usize| {
        let value = record.get(idx)?.trim();
        if value.is_empty() { None } else { Some(value) }
    };

    let datetime = parse_incident_datetime(field(cols.datetime)?)?;
    let day_of_week: DayOfWeek = field(cols.day_of_week)?.parse().ok()?;
    let category = field(cols.category)?.to_owned();
    let district = field(cols.district)?.to_owned();
    let latitude: f64 = field(cols.latitude)?.parse().ok()?;
    let longitude: f64 = field(cols.longitude)?.parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(IncidentRecord {
        datetime,
        day_of_week,
        hour: datetime.hour() as u8,
        month: datetime.month() as u8,
        category,
        district,
        latitude,
        longitude,
    })
}

/// Loads and normalizes incident records from any CSV reader.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the source is unreadable, is not valid
/// CSV, or its header is missing a required column.
pub fn load_from_reader<R: Read>(rdr: R) -> Result<NormalizedDataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);

    let cols = ColumnIndexes::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let row = result?;
        match normalize_row(&row, &cols) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    log::info!(
        "Loaded {} incident records ({dropped} dropped during normalization)",
        records.len()
    );

    Ok(NormalizedDataset::new(records))
}

/// Loads and normalizes incident records from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`DataLoadError`] if the file is unreadable, is not valid CSV,
/// or its header is missing a required column.
pub fn load(path: &Path) -> Result<NormalizedDataset, DataLoadError> {
    let file = File::open(path)?;
    load_from_reader(file)
}
