#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Earthquake feed downloader and parser.
//!
//! Downloads the USGS rolling-window summary CSV and maps each data row
//! positionally into a [`FeedRow`]. The feed is delivered newest-first and
//! is not re-sorted here; downstream cutoff detection depends on that
//! ordering.

use std::time::Duration;

use chrono::{DateTime, Utc};
use quake_map_feed_models::FeedRow;

/// Default upstream feed: magnitude 2.5+ earthquakes over the trailing week.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_week.csv";

/// Bound on the feed download so a run cannot block indefinitely.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// Positional column contract of the upstream CSV.
const COL_TIME: usize = 0;
const COL_LATITUDE: usize = 1;
const COL_LONGITUDE: usize = 2;
const COL_DEPTH: usize = 3;
const COL_MAGNITUDE: usize = 4;
const COL_ID: usize = 11;
const COL_PLACE: usize = 13;

/// Errors that can occur while retrieving or parsing the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CSV reader failed on the response body.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row did not match the positional column contract.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Downloads and parses the earthquake feed.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    /// URL of the feed CSV.
    url: String,
}

impl FeedFetcher {
    /// Creates a fetcher for the given feed URL.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
        }
    }

    /// Creates a fetcher from the `FEED_URL` environment variable, falling
    /// back to [`DEFAULT_FEED_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());
        Self::new(&url)
    }

    /// Downloads the feed and parses it into ordered rows, newest-first as
    /// delivered by the upstream.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the request fails or the server
    /// responds with a non-success status (no partial result), and
    /// [`FeedError::Parse`] / [`FeedError::Csv`] if the body does not match
    /// the column contract.
    pub async fn fetch(&self) -> Result<Vec<FeedRow>, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent("quake-map/1.0 (https://github.com/BSteffaniak/quake-map)")
            .timeout(FETCH_TIMEOUT)
            .build()?;

        let response = client.get(&self.url).send().await?.error_for_status()?;
        let body = response.bytes().await?;

        log::debug!("Downloaded {} bytes from {}", body.len(), self.url);

        parse_feed(&body)
    }
}

/// Parses a feed body into ordered rows.
///
/// The header row is discarded; each subsequent row is mapped positionally.
/// A malformed row (too few columns, unparsable timestamp or numeric)
/// aborts the whole batch: skipping a row could skip the ingestion cutoff
/// and re-insert history, while an aborted run inserts nothing and the next
/// scheduled run retries.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] naming the offending line, or
/// [`FeedError::Csv`] if the reader itself fails.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let mut rows = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // 1-based file line, accounting for the header row.
        let line = i + 2;

        if record.len() <= COL_PLACE {
            return Err(FeedError::Parse(format!(
                "line {line}: expected at least {} columns, got {}",
                COL_PLACE + 1,
                record.len()
            )));
        }

        rows.push(FeedRow {
            time: parse_time(&record, line)?,
            latitude: parse_f64(&record, COL_LATITUDE, line)?,
            longitude: parse_f64(&record, COL_LONGITUDE, line)?,
            depth: parse_f64(&record, COL_DEPTH, line)?,
            magnitude: parse_f64(&record, COL_MAGNITUDE, line)?,
            earthquake_id: record.get(COL_ID).unwrap_or("").trim().to_owned(),
            place: record.get(COL_PLACE).unwrap_or("").trim().to_owned(),
        });
    }

    log::info!("Parsed {} feed rows", rows.len());

    Ok(rows)
}

fn parse_time(record: &csv::StringRecord, line: usize) -> Result<DateTime<Utc>, FeedError> {
    let raw = record.get(COL_TIME).unwrap_or("").trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| FeedError::Parse(format!("line {line}: bad timestamp '{raw}': {e}")))
}

fn parse_f64(record: &csv::StringRecord, col: usize, line: usize) -> Result<f64, FeedError> {
    let raw = record.get(col).unwrap_or("").trim();
    raw.parse()
        .map_err(|_| FeedError::Parse(format!("line {line}: column {col} is not a number: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "time,latitude,longitude,depth,mag,magType,nst,gap,dmin,rms,net,id,updated,place,type,horizontalError,depthError,magError,magNst,status,locationSource,magSource";

    fn feed(rows: &[&str]) -> Vec<u8> {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.into_bytes()
    }

    #[test]
    fn maps_columns_positionally() {
        let body = feed(&[
            "2026-08-05T10:15:30.120Z,35.6895,-117.5210,8.21,4.6,mw,42,68,0.07,0.81,us,us7000quake1,2026-08-05T10:30:00.000Z,\"12 km NE of Ridgecrest, CA\",earthquake,1.2,0.5,0.04,120,reviewed,us,us",
        ]);

        let rows = parse_feed(&body).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.earthquake_id, "us7000quake1");
        assert_eq!(row.place, "12 km NE of Ridgecrest, CA");
        assert!((row.latitude - 35.6895).abs() < 1e-9);
        assert!((row.longitude - -117.5210).abs() < 1e-9);
        assert!((row.depth - 8.21).abs() < 1e-9);
        assert!((row.magnitude - 4.6).abs() < 1e-9);
        assert_eq!(row.time.to_rfc3339(), "2026-08-05T10:15:30.120+00:00");
    }

    #[test]
    fn preserves_feed_order() {
        let body = feed(&[
            "2026-08-05T10:00:00.000Z,1.0,2.0,3.0,4.0,mw,,,,,us,newest,,somewhere,earthquake,,,,,,,",
            "2026-08-04T10:00:00.000Z,1.0,2.0,3.0,4.0,mw,,,,,us,older,,somewhere,earthquake,,,,,,,",
        ]);

        let rows = parse_feed(&body).unwrap();
        assert_eq!(rows[0].earthquake_id, "newest");
        assert_eq!(rows[1].earthquake_id, "older");
    }

    #[test]
    fn header_only_feed_is_empty() {
        let rows = parse_feed(&feed(&[])).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn short_row_aborts_batch() {
        let body = feed(&["2026-08-05T10:00:00.000Z,1.0,2.0,3.0,4.0"]);
        let err = parse_feed(&body).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn bad_magnitude_aborts_batch() {
        let body = feed(&[
            "2026-08-05T10:00:00.000Z,1.0,2.0,3.0,not-a-number,mw,,,,,us,us7000bad,,somewhere,earthquake,,,,,,,",
        ]);
        let err = parse_feed(&body).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn bad_timestamp_aborts_batch() {
        let body = feed(&[
            "yesterday,1.0,2.0,3.0,4.0,mw,,,,,us,us7000bad,,somewhere,earthquake,,,,,,,",
        ]);
        let err = parse_feed(&body).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }
}
