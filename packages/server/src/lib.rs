#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web read-only API server for the quake map.
//!
//! Serves the accumulated earthquake records over HTTP, sorted by
//! magnitude. Writes happen only in the ingestion tool; this server opens
//! the same `SQLite` database and never modifies it.

mod handlers;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use quake_map_database::db;

/// Shared application state.
///
/// `rusqlite::Connection` is `Send` but not `Sync`, so the handle is
/// wrapped in a `Mutex`.
pub struct AppState {
    /// `SQLite` database connection.
    pub db: Arc<Mutex<rusqlite::Connection>>,
}

/// Starts the quake map API server.
///
/// Opens the `SQLite` database (applying the schema if needed) and starts
/// the Actix-Web HTTP server. This is a regular async function — the
/// caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the database cannot be opened.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Opening database...");
    let db_conn = db::connect_from_env().expect("Failed to open database");

    let state = web::Data::new(AppState {
        db: Arc::new(Mutex::new(db_conn)),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/earthquakes", web::get().to(handlers::earthquakes))
                    .route("/earthquakes/{id}", web::get().to(handlers::earthquake)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
