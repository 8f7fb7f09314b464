#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types for stored earthquakes.
//!
//! These types represent the shapes of data as stored in and retrieved from
//! the `SQLite` database. They are distinct from the transient feed types in
//! `quake_map_feed_models` and the API response types in
//! `quake_map_server_models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored earthquake record as read back from the database.
///
/// Records are created once by the ingestion engine and never mutated or
/// deleted afterwards; the read API only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    /// Database-assigned row id.
    pub id: i64,
    /// Feed-assigned unique identifier (unique within this dataset).
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
    /// Free-text place description from the feed.
    pub place: String,
}

/// Insert payload for a new earthquake record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEarthquake {
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
    /// Free-text place description from the feed.
    pub place: String,
}
