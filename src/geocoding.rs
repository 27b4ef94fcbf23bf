//! Address geocoding via the US Census Bureau geocoder
//!
//! Resolves a free-text US street address into the canonical matched
//! address and its coordinates. Only the first match is used.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::UpstreamConfig;
use crate::error::ForecastError;
use crate::models::GeocodedLocation;

/// Resolves addresses to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<GeocodedLocation, ForecastError>;
}

/// Client for the census `onelineaddress` endpoint
#[derive(Debug, Clone)]
pub struct CensusGeocoder {
    client: Client,
    base_url: String,
    benchmark: String,
}

impl CensusGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>, benchmark: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            benchmark: benchmark.into(),
        }
    }

    #[must_use]
    pub fn from_config(client: Client, config: &UpstreamConfig) -> Self {
        Self::new(client, &config.geocoder_base_url, &config.census_benchmark)
    }

    fn lookup_url(&self, address: &str) -> String {
        format!(
            "{}/locations/onelineaddress?address={}&benchmark={}&format=json",
            self.base_url,
            urlencoding::encode(address),
            self.benchmark
        )
    }
}

#[async_trait]
impl Geocoder for CensusGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<GeocodedLocation, ForecastError> {
        let url = self.lookup_url(address);
        debug!("Census geocoder request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                warn!("Geocoder request failed: {}", e);
                ForecastError::AddressLookupFailed { source: Some(e) }
            })?;

        if !response.status().is_success() {
            warn!("Geocoder returned status {}", response.status());
            return Err(ForecastError::lookup_failed());
        }

        let body: census::GeocodeResponse = response.json().await?;

        let first = body
            .result
            .address_matches
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(ForecastError::AddressNotFound)?;

        info!(
            "Geocoded to {} ({:.4}, {:.4})",
            first.matched_address, first.coordinates.y, first.coordinates.x
        );

        Ok(first.into())
    }
}

/// Census geocoder response structures
mod census {
    use super::{Deserialize, GeocodedLocation};

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        pub result: GeocodeResult,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GeocodeResult {
        #[serde(default)]
        pub address_matches: Option<Vec<AddressMatch>>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AddressMatch {
        pub coordinates: Coordinates,
        pub matched_address: String,
    }

    /// `x` is longitude, `y` is latitude
    #[derive(Debug, Deserialize)]
    pub struct Coordinates {
        pub x: f64,
        pub y: f64,
    }

    impl From<AddressMatch> for GeocodedLocation {
        fn from(value: AddressMatch) -> Self {
            GeocodedLocation {
                latitude: value.coordinates.y,
                longitude: value.coordinates.x,
                address: value.matched_address,
            }
        }
    }
}
