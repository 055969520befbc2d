#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for shoreline debris reports and volunteer
//! contributions.
//!
//! Serves the dirty dozen, sunburst breakdown, date range and location
//! endpoints read by the charting frontend, plus the entry-form lists and
//! the contribution insert used by the data-entry page. Every request is
//! independent; the only shared state is the row source.

pub mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use shoreline_database::{DatabaseRowSource, db};
use shoreline_debris::source::RowSource;

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Storage for reports and contributions.
    pub source: Arc<dyn RowSource>,
    /// Request defaults.
    pub config: Arc<ServerConfig>,
}

/// Paths served by the API, listed by `GET /`.
pub const ROUTES: &[&str] = &[
    "/",
    "/health",
    "/locations",
    "/locationsHierarchy",
    "/dirtydozen",
    "/breakdown",
    "/validdaterange",
    "/getTLs",
    "/getTrashItems",
    "/insertContribution",
];

/// Registers every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health))
        .route("/locations", web::get().to(handlers::locations))
        .route(
            "/locationsHierarchy",
            web::get().to(handlers::locations_hierarchy),
        )
        .route("/dirtydozen", web::get().to(handlers::dirty_dozen))
        .route("/breakdown", web::get().to(handlers::breakdown))
        .route("/validdaterange", web::get().to(handlers::valid_date_range))
        .route("/getTLs", web::get().to(handlers::team_captains))
        .route("/getTrashItems", web::get().to(handlers::trash_items))
        .route(
            "/insertContribution",
            web::post().to(handlers::insert_contribution),
        );
}

/// Starts the shoreline API server.
///
/// Reads [`ServerConfig`] from the environment, connects to the database
/// named by `DATABASE_URL`, and serves until shut down. The caller
/// provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database connection fails.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to database");

    let state = web::Data::new(AppState {
        source: Arc::new(DatabaseRowSource::new(Arc::from(db_conn))),
        config: Arc::new(config.clone()),
    });

    log::info!(
        "Starting server on {}:{} (default location '{}', default start {})",
        config.bind_addr,
        config.port,
        config.default_location_name,
        config.default_start_date
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
