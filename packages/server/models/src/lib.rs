#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! JSON response types for the quake map read API.

use chrono::{DateTime, Utc};
use quake_map_database_models::EarthquakeRecord;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server considers itself healthy.
    pub healthy: bool,
    /// Server package version.
    pub version: String,
}

/// A stored earthquake as exposed over the read API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEarthquake {
    /// Database row id (the retrieval key).
    pub id: i64,
    /// Feed-assigned unique identifier.
    pub earthquake_id: String,
    /// Origin time of the event (UTC).
    pub time: DateTime<Utc>,
    /// Hypocenter depth in kilometers.
    pub depth: f64,
    /// Event magnitude.
    pub magnitude: f64,
    /// Epicenter latitude (WGS84).
    pub latitude: f64,
    /// Epicenter longitude (WGS84).
    pub longitude: f64,
    /// Reverse-geocoded country, when one could be resolved.
    pub country: Option<String>,
    /// Free-text place description.
    pub place: String,
}

impl From<EarthquakeRecord> for ApiEarthquake {
    fn from(record: EarthquakeRecord) -> Self {
        Self {
            id: record.id,
            earthquake_id: record.earthquake_id,
            time: record.time,
            depth: record.depth,
            magnitude: record.magnitude,
            latitude: record.latitude,
            longitude: record.longitude,
            country: record.country,
            place: record.place,
        }
    }
}
