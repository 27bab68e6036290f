#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation result types for the SF crime dashboard.
//!
//! These types are serialized to JSON for the dashboard frontend. Field
//! names and the hex color strings are part of the API contract and must
//! not change.

use serde::ser::SerializeMap as _;
use serde::{Deserialize, Serialize, Serializer};

/// One district with its incident count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictCount {
    /// Police district label.
    pub district: String,
    /// Number of incidents in the district.
    pub count: u64,
}

/// Districts ranked by descending incident count.
///
/// Serializes as a JSON object (`{"Mission": 3, "Bayview": 1}`) whose key
/// order is the rank order, which is what the dashboard frontend expects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopDistricts(Vec<DistrictCount>);

impl TopDistricts {
    /// Wraps an already-ranked list of district counts.
    #[must_use]
    pub const fn new(ranked: Vec<DistrictCount>) -> Self {
        Self(ranked)
    }

    /// Returns the districts in rank order.
    #[must_use]
    pub fn as_slice(&self) -> &[DistrictCount] {
        &self.0
    }

    /// Returns the number of ranked districts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no districts are ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TopDistricts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // serde_json's default map type would re-sort the keys
        // alphabetically, losing the rank order.
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.district, &entry.count)?;
        }
        map.end()
    }
}

/// Labels and values for one chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSeries {
    /// Axis labels, one per data point.
    pub labels: Vec<String>,
    /// Average incident counts, rounded to 1 decimal place.
    pub data: Vec<f64>,
}

/// The three time-distribution chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Average incidents per hour of day (24 points, `"0:00"`-`"23:00"`).
    pub hourly: GraphSeries,
    /// Average incidents per day of week (7 points, Monday first).
    pub daily: GraphSeries,
    /// Average incidents per month (12 points, `"Jan"`-`"Dec"`).
    pub monthly: GraphSeries,
}

/// Density tier of a heatmap bucket relative to the percentile thresholds
/// of all bucket counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    /// Count at or above the 90th percentile.
    Hotspot,
    /// Count between the 70th (inclusive) and 90th percentiles.
    Elevated,
    /// Count below the 70th percentile.
    Background,
}

impl DensityTier {
    /// Classifies a bucket count against the 70th/90th percentile
    /// thresholds.
    #[must_use]
    pub fn from_count(count: f64, p70: f64, p90: f64) -> Self {
        if count >= p90 {
            Self::Hotspot
        } else if count >= p70 {
            Self::Elevated
        } else {
            Self::Background
        }
    }

    /// Hex color string for this tier.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Hotspot => "#ff4444",
            Self::Elevated => "#ffbb33",
            Self::Background => "#00C851",
        }
    }

    /// Marker radius in pixels for this tier.
    #[must_use]
    pub const fn radius(self) -> u8 {
        match self {
            Self::Hotspot => 8,
            Self::Elevated => 6,
            Self::Background => 4,
        }
    }
}

/// One aggregated heatmap bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// Mean latitude of the incidents in the bucket.
    pub lat: f64,
    /// Mean longitude of the incidents in the bucket.
    pub lng: f64,
    /// Hex color string for the bucket's density tier.
    pub color: String,
    /// Marker radius in pixels for the bucket's density tier.
    pub radius: u8,
    /// Police district the bucket belongs to.
    pub district: String,
    /// Incident category the bucket belongs to.
    pub category: String,
    /// Number of incidents in the bucket.
    pub count: u64,
}
