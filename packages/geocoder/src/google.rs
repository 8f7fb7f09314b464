//! Google Maps Geocoding API client.
//!
//! One outbound GET per coordinate pair, requesting country-level results
//! only. The API key is supplied by the caller (read from process
//! configuration at the entry point), never baked into the binary.
//!
//! See <https://developers.google.com/maps/documentation/geocoding/requests-reverse-geocoding>

use std::time::Duration;

use async_trait::async_trait;

use crate::{CountryResolver, GeocodeError};

/// Production endpoint of the Google Maps Geocoding API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Bound on each geocoding request so one slow lookup cannot stall the
/// whole ingestion run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reverse geocoder backed by the Google Maps Geocoding API.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Creates a geocoder against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client fails to build.
    pub fn new(api_key: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a geocoder against a custom endpoint (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP client fails to build.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent("quake-map/1.0 (https://github.com/BSteffaniak/quake-map)")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
        })
    }
}

#[async_trait]
impl CountryResolver for GoogleGeocoder {
    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, GeocodeError> {
        let latlng = format!("{latitude},{longitude}");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latlng", latlng.as_str()),
                ("key", self.api_key.as_str()),
                ("result_type", "country"),
            ])
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Geocoding API response into an optional country name.
///
/// Scans the first result's address components for one tagged `country`
/// and returns its display name. An empty result set or a result with no
/// country-tagged component is `None`, not an error.
fn parse_response(body: &serde_json::Value) -> Result<Option<String>, GeocodeError> {
    let results = body["results"].as_array().ok_or_else(|| GeocodeError::Parse {
        message: "response has no results array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let components = first["address_components"]
        .as_array()
        .ok_or_else(|| GeocodeError::Parse {
            message: "result has no address_components".to_string(),
        })?;

    for component in components {
        let tagged_country = component["types"]
            .as_array()
            .is_some_and(|types| types.iter().any(|t| t.as_str() == Some("country")));

        if tagged_country
            && let Some(name) = component["long_name"].as_str()
        {
            return Ok(Some(name.to_owned()));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_country_component() {
        let body = serde_json::json!({
            "results": [{
                "address_components": [
                    {
                        "long_name": "Ridgecrest",
                        "types": ["locality", "political"]
                    },
                    {
                        "long_name": "United States",
                        "short_name": "US",
                        "types": ["country", "political"]
                    }
                ]
            }]
        });
        let country = parse_response(&body).unwrap();
        assert_eq!(country.as_deref(), Some("United States"));
    }

    #[test]
    fn empty_results_is_none() {
        let body = serde_json::json!({ "results": [] });
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn no_country_component_is_none() {
        let body = serde_json::json!({
            "results": [{
                "address_components": [
                    { "long_name": "Pacific Ocean", "types": ["natural_feature"] }
                ]
            }]
        });
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn missing_results_array_is_error() {
        let body = serde_json::json!({ "status": "REQUEST_DENIED" });
        let err = parse_response(&body).unwrap_err();
        assert!(matches!(err, GeocodeError::Parse { .. }));
    }
}
