#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the SF crime dashboard server.
//!
//! The aggregation payloads themselves live in `sf_crime_analytics_models`;
//! this crate only holds the server-specific envelope and query types.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is serving a loaded dataset.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of records in the loaded dataset.
    pub records: u64,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapQueryParams {
    /// Maximum number of heatmap buckets to return.
    pub sample_size: Option<usize>,
}

/// Query parameters for the top-districts endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDistrictsQueryParams {
    /// Number of districts to return.
    pub top_n: Option<usize>,
}
