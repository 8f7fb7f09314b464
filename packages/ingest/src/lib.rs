#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for ingesting the earthquake feed into the `SQLite` database.
//!
//! The feed is a rolling window that overlaps previously ingested data, so
//! each run walks the rows newest-first and stops at the first identifier
//! it has already stored. Comparing against only that single cutoff
//! identifier is an O(new-rows) incremental-sync strategy — correct
//! because the feed is delivered newest-first and the cutoff is the true
//! most recent insert.

use std::time::Instant;

use quake_map_database::{DbError, queries};
use quake_map_database_models::NewEarthquake;
use quake_map_feed::{FeedError, FeedFetcher};
use quake_map_feed_models::FeedRow;
use quake_map_geocoder::CountryResolver;
use rusqlite::Connection;
use thiserror::Error;

/// Errors from the row-by-row ingestion loop.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Persisting a row failed. Rows inserted earlier in this run remain
    /// stored; the count is carried here since no success count is
    /// returned on an aborted run.
    #[error("storage failure after {inserted} new records: {source}")]
    Storage {
        /// Records inserted before the failure.
        inserted: u64,
        /// The underlying database error.
        #[source]
        source: DbError,
    },
}

/// Errors from a full fetch-and-ingest cycle.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Retrieving or parsing the feed failed; nothing was inserted.
    #[error("Feed error: {0}")]
    Fetch(#[from] FeedError),

    /// Reading the ingestion cutoff failed.
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// The ingestion loop failed part-way through the batch.
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),
}

/// Walks feed rows newest-first and persists every row strictly newer than
/// the stored cutoff.
///
/// Stops at the first row whose identifier equals `last_known_id` —
/// everything from that point onward is already stored. Each new row is
/// reverse geocoded before insertion; a geocoding failure degrades to a
/// null country for that row instead of aborting the batch.
///
/// Returns the exact number of records inserted by this call.
///
/// # Errors
///
/// Returns [`IngestError::Storage`] if persisting a row fails. The batch is
/// not transactional: rows inserted before the failure remain stored.
pub async fn ingest(
    db: &Connection,
    resolver: &dyn CountryResolver,
    rows: &[FeedRow],
    last_known_id: Option<&str>,
) -> Result<u64, IngestError> {
    let mut inserted = 0u64;

    for row in rows {
        if let Some(cutoff) = last_known_id
            && row.earthquake_id == cutoff
        {
            log::info!("Reached previously stored record {cutoff}, stopping");
            break;
        }

        let country = match resolver.resolve(row.latitude, row.longitude).await {
            Ok(country) => country,
            Err(e) => {
                log::warn!("Geocoding failed for {}: {e}", row.earthquake_id);
                None
            }
        };

        let quake = NewEarthquake {
            earthquake_id: row.earthquake_id.clone(),
            time: row.time,
            depth: row.depth,
            magnitude: row.magnitude,
            latitude: row.latitude,
            longitude: row.longitude,
            country,
            place: row.place.clone(),
        };

        queries::insert_earthquake(db, &quake)
            .map_err(|source| IngestError::Storage { inserted, source })?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Runs one full ingestion cycle: fetch the feed, read the current cutoff
/// from storage, ingest everything newer, and return the inserted count.
///
/// # Errors
///
/// Returns [`SyncError`] if the fetch, the cutoff read, or the ingestion
/// loop fails.
pub async fn sync(
    db: &Connection,
    fetcher: &FeedFetcher,
    resolver: &dyn CountryResolver,
) -> Result<u64, SyncError> {
    let start = Instant::now();

    let rows = fetcher.fetch().await?;
    let last_known = queries::latest_earthquake_id(db)?;

    log::info!(
        "Fetched {} feed rows (cutoff: {})",
        rows.len(),
        last_known.as_deref().unwrap_or("none")
    );

    let inserted = ingest(db, resolver, &rows, last_known.as_deref()).await?;

    log::info!(
        "Sync complete: {inserted} inserted, took {:.1}s",
        start.elapsed().as_secs_f64()
    );

    Ok(inserted)
}
