#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalized incident record types for the SF crime dashboard.
//!
//! This crate defines the canonical in-memory shape that raw incident
//! rows are normalized into at load time. Everything downstream of the
//! loader (the aggregation engine, the API server) consumes these types
//! and never sees the raw tabular source.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Canonical day-of-week vocabulary, Monday first.
///
/// Parsing is case-insensitive, so `"MONDAY"`, `"monday"`, and `"Monday"`
/// all normalize to [`DayOfWeek::Monday`]. The `Display` form is the
/// capitalized full name used in API labels.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DayOfWeek {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl DayOfWeek {
    /// Returns all variants in Monday-first order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }

    /// Returns the Monday-first position of this day (0-6).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One normalized crime incident.
///
/// Every record that survives loading has all fields populated and
/// range-valid: `hour` in 0-23, `month` in 1-12, `latitude` in [-90, 90],
/// `longitude` in [-180, 180]. Records violating any of these are dropped
/// by the loader and never reach aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// When the incident occurred (timezone-naive, as reported).
    pub datetime: NaiveDateTime,
    /// Day of week the incident occurred on.
    pub day_of_week: DayOfWeek,
    /// Hour of day (0-23), derived from `datetime`.
    pub hour: u8,
    /// Month (1-12), derived from `datetime`.
    pub month: u8,
    /// Incident category label (e.g. "Larceny Theft").
    pub category: String,
    /// Police district label (e.g. "Mission").
    pub district: String,
    /// Latitude in [-90, 90].
    pub latitude: f64,
    /// Longitude in [-180, 180].
    pub longitude: f64,
}

/// The immutable normalized record set.
///
/// Built once by the loader at process start and shared read-only across
/// request handlers. Aggregations produce new derived structures and
/// never write back into this set, so no synchronization is needed for
/// concurrent reads.
#[derive(Debug, Clone, Default)]
pub struct NormalizedDataset {
    records: Vec<IncidentRecord>,
}

impl NormalizedDataset {
    /// Wraps an already-normalized record set.
    #[must_use]
    pub const fn new(records: Vec<IncidentRecord>) -> Self {
        Self { records }
    }

    /// Returns the records in load order.
    #[must_use]
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the most recent incident timestamp, or `None` for an empty
    /// dataset. Time windows anchor to this rather than wall-clock time so
    /// that a stale dataset still yields a non-empty window.
    #[must_use]
    pub fn max_datetime(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.datetime).max()
    }
}
