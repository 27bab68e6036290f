#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the SF crime dashboard.
//!
//! Three independent read-only aggregations over the normalized record
//! set: district ranking, time-distribution averages, and spatial heatmap
//! buckets. Each runs per request against the shared immutable dataset
//! and produces a new derived structure; nothing here mutates the
//! dataset.

pub mod districts;
pub mod graphs;
pub mod heatmap;
pub mod window;

use thiserror::Error;

/// Errors that can occur inside an aggregation.
///
/// These never escape the aggregation boundary: the public entry points
/// map them to the documented degraded output (empty list, zero-filled
/// series) and log the diagnostic.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// A derived aggregate value was not a finite number.
    #[error("Aggregation error: {message}")]
    NonFinite {
        /// Description of the non-finite aggregate.
        message: String,
    },
}
