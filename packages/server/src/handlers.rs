//! HTTP handler functions for the dashboard API.
//!
//! Handlers are thin: they pull the shared dataset out of [`AppState`],
//! run the relevant aggregation, and serialize the result. Aggregations
//! that can fail internally already degrade to their documented empty
//! output, so a request never takes down the service.

use actix_web::{HttpResponse, web};
use sf_crime_analytics::{districts, graphs, heatmap};
use sf_crime_server_models::{ApiHealth, HeatmapQueryParams, TopDistrictsQueryParams};

use crate::AppState;

/// `GET /health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.dataset.len() as u64,
    })
}

/// `GET /top_districts`
///
/// Returns the top districts by incident count as an object whose key
/// order is the rank order.
pub async fn top_districts(
    state: web::Data<AppState>,
    params: web::Query<TopDistrictsQueryParams>,
) -> HttpResponse {
    let top_n = params.top_n.unwrap_or(districts::DEFAULT_TOP_N);
    let ranked = districts::get_top_districts(&state.dataset, top_n);
    HttpResponse::Ok().json(ranked)
}

/// `GET /graph_data`
///
/// Returns the hourly/daily/monthly average series.
pub async fn graph_data(state: web::Data<AppState>) -> HttpResponse {
    let graphs = graphs::generate_graph_data(&state.dataset);
    HttpResponse::Ok().json(graphs)
}

/// `GET /heatmap_data`
///
/// Returns the spatial heatmap buckets for the recent time window. On
/// any internal aggregation failure this degrades to an empty array.
pub async fn heatmap_data(
    state: web::Data<AppState>,
    params: web::Query<HeatmapQueryParams>,
) -> HttpResponse {
    let sample_size = params.sample_size.unwrap_or(heatmap::DEFAULT_SAMPLE_SIZE);
    let points = heatmap::prepare_heatmap_data(&state.dataset, sample_size);
    HttpResponse::Ok().json(points)
}
