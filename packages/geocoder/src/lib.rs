#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reverse geocoding for earthquake coordinates.
//!
//! Resolves a coordinate pair to a country name. The [`CountryResolver`]
//! trait is the seam the ingestion engine depends on, so tests can inject a
//! fake resolver; [`google::GoogleGeocoder`] is the production
//! implementation.

pub mod google;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from reverse-geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// Resolves a coordinate pair to a country name.
///
/// Absence of a country (`Ok(None)`) is a valid, expected outcome — open
/// ocean has no country — and is distinct from a failed lookup.
#[async_trait]
pub trait CountryResolver: Send + Sync {
    /// Resolves the country containing the given coordinates, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the lookup itself fails (network or
    /// malformed response).
    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, GeocodeError>;
}
