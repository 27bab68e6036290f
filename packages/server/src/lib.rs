#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard server for the SF crime analysis application.
//!
//! Loads the incident dataset once at startup and serves read-only JSON
//! aggregations over it plus the static dashboard page. The dataset is
//! shared across workers behind an `Arc` and never mutated, so request
//! handling needs no locking.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use sf_crime_dataset_models::NormalizedDataset;

/// Shared application state.
pub struct AppState {
    /// The normalized record set, loaded once at startup.
    pub dataset: Arc<NormalizedDataset>,
}

/// Starts the dashboard server.
///
/// Loads the dataset from the file named by `DATA_FILE` (default
/// `data/sf_incidents.csv`), then binds to `BIND_ADDR`/`PORT` (defaults
/// `0.0.0.0:5000`). This is a regular async function — the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the dataset cannot be loaded — the server must not start
/// serving requests with no data.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_file =
        std::env::var("DATA_FILE").unwrap_or_else(|_| "data/sf_incidents.csv".to_string());

    log::info!("Loading incident data from {data_file}...");
    let dataset = sf_crime_dataset::load(Path::new(&data_file)).expect("Failed to load dataset");
    log::info!("Data loaded successfully with {} records", dataset.len());

    let state = web::Data::new(AppState {
        dataset: Arc::new(dataset),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/top_districts", web::get().to(handlers::top_districts))
            .route("/graph_data", web::get().to(handlers::graph_data))
            .route("/heatmap_data", web::get().to(handlers::heatmap_data))
            // Serve the dashboard page and its assets
            .service(Files::new("/", "static").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
