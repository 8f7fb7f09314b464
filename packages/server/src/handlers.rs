//! HTTP handler functions for the quake map read API.

use actix_web::{HttpResponse, web};
use quake_map_database::queries;
use quake_map_server_models::{ApiEarthquake, ApiHealth};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/earthquakes`
///
/// Returns all stored earthquakes ordered by magnitude descending.
pub async fn earthquakes(state: web::Data<AppState>) -> HttpResponse {
    let conn = state.db.lock().expect("database mutex poisoned");

    match queries::list_by_magnitude(&conn) {
        Ok(rows) => {
            let quakes: Vec<ApiEarthquake> = rows.into_iter().map(ApiEarthquake::from).collect();
            HttpResponse::Ok().json(quakes)
        }
        Err(e) => {
            log::error!("Failed to query earthquakes: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query earthquakes"
            }))
        }
    }
}

/// `GET /api/earthquakes/{id}`
///
/// Returns a single earthquake by database row id.
pub async fn earthquake(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let conn = state.db.lock().expect("database mutex poisoned");

    match queries::get_by_id(&conn, id) {
        Ok(Some(record)) => HttpResponse::Ok().json(ApiEarthquake::from(record)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Not found"
        })),
        Err(e) => {
            log::error!("Failed to query earthquake {id}: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query earthquake"
            }))
        }
    }
}
