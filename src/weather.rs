//! National Weather Service forecast client
//!
//! Coordinates are first resolved to a gridpoint forecast URL through the
//! `/points` endpoint, then that URL is fetched for the day/night periods.

use async_trait::async_trait;
use reqwest::{Client, Response, header::ACCEPT};
use tracing::{debug, error, info, instrument};

use crate::config::UpstreamConfig;
use crate::error::ForecastError;
use crate::models::{GeocodedLocation, WeatherPeriod};

const GEO_JSON: &str = "application/geo+json";

/// Resolves coordinates to forecast periods
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn forecast(&self, location: &GeocodedLocation)
    -> Result<Vec<WeatherPeriod>, ForecastError>;
}

/// Client for api.weather.gov
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(client: Client, config: &UpstreamConfig) -> Self {
        Self::new(client, &config.weather_base_url)
    }

    fn point_url(&self, location: &GeocodedLocation) -> String {
        format!("{}/points/{}", self.base_url, location.point_path())
    }

    async fn get(&self, url: &str) -> Result<Response, ForecastError> {
        Ok(self.client.get(url).header(ACCEPT, GEO_JSON).send().await?)
    }

    /// Look up the gridpoint forecast URL for a location
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn forecast_url(&self, location: &GeocodedLocation) -> Result<String, ForecastError> {
        let url = self.point_url(location);
        debug!("NWS points request URL: {}", url);

        let response = self.get(&url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "NWS Points API error: {}", body);
            return Err(ForecastError::LocationNotSupported);
        }

        let point: nws::PointResponse = response.json().await?;
        point
            .properties
            .forecast
            .ok_or_else(|| ForecastError::unexpected("NWS point response has no forecast URL"))
    }

    /// Fetch the forecast periods behind a gridpoint forecast URL
    #[instrument(skip(self))]
    pub async fn periods(&self, forecast_url: &str) -> Result<Vec<WeatherPeriod>, ForecastError> {
        let response = self.get(forecast_url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, "NWS Forecast API error: {}", body);
            return Err(ForecastError::ForecastUnavailable);
        }

        let forecast: nws::ForecastResponse = response.json().await?;
        info!("Retrieved {} forecast periods", forecast.properties.periods.len());
        Ok(forecast.properties.periods)
    }
}

#[async_trait]
impl ForecastProvider for NwsClient {
    async fn forecast(
        &self,
        location: &GeocodedLocation,
    ) -> Result<Vec<WeatherPeriod>, ForecastError> {
        let forecast_url = self.forecast_url(location).await?;
        self.periods(&forecast_url).await
    }
}

/// api.weather.gov response structures
mod nws {
    use crate::models::WeatherPeriod;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct PointResponse {
        pub properties: PointProperties,
    }

    #[derive(Debug, Deserialize)]
    pub struct PointProperties {
        pub forecast: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub properties: ForecastProperties,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastProperties {
        pub periods: Vec<WeatherPeriod>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_url() {
        let client = NwsClient::new(Client::new(), "https://api.weather.gov/");
        let location = GeocodedLocation::new(38.895, -77.036, "White House");
        assert_eq!(
            client.point_url(&location),
            "https://api.weather.gov/points/38.895,-77.036"
        );
    }

    #[test]
    fn test_point_response_ignores_extra_properties() {
        let point: nws::PointResponse = serde_json::from_value(serde_json::json!({
            "properties": {
                "forecast": "https://api.weather.gov/gridpoints/LWX/97,71/forecast",
                "forecastHourly": "https://api.weather.gov/gridpoints/LWX/97,71/forecast/hourly",
                "gridId": "LWX",
                "gridX": 97,
                "gridY": 71
            }
        }))
        .unwrap();

        assert_eq!(
            point.properties.forecast.as_deref(),
            Some("https://api.weather.gov/gridpoints/LWX/97,71/forecast")
        );
    }
}
