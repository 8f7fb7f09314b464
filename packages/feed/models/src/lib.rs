#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Transient record types produced by the earthquake feed parser.
//!
//! These are the shapes of data as delivered by the upstream feed, before
//! enrichment and persistence. They are distinct from the stored row types
//! in `quake_map_database_models`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed data line of the upstream earthquake feed.
///
/// Produced by the feed fetcher in feed order (newest-first) and consumed
/// once by the ingestion engine; never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRow {
    /// Origin time of the event (UTC).
    pub time: DateTime<Utc>,
    /// Epicenter latitude (WGS84).
    pub latitude: f64,
    /// Epicenter longitude (WGS84).
    pub longitude: f64,
    /// Hypocenter depth in kilometers.
    pub depth: f64,
    /// Event magnitude.
    pub magnitude: f64,
    /// Feed-assigned unique identifier (e.g. `"us7000abcd"`).
    pub earthquake_id: String,
    /// Free-text place description (e.g. `"12 km NE of Ridgecrest, CA"`).
    pub place: String,
}
