//! HTTP API: address in, grouped 7-day forecast out

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::UpstreamConfig;
use crate::error::ForecastError;
use crate::geocoding::{CensusGeocoder, Geocoder};
use crate::grouping::group_periods_by_day;
use crate::models::ForecastApiResponse;
use crate::weather::{ForecastProvider, NwsClient};

/// Upstream clients shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub forecaster: Arc<dyn ForecastProvider>,
}

impl AppState {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastProvider>) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Census geocoder and NWS client sharing one HTTP client
    pub fn from_config(config: &UpstreamConfig) -> reqwest::Result<Self> {
        let client = config.http_client()?;
        Ok(Self::new(
            Arc::new(CensusGeocoder::from_config(client.clone(), config)),
            Arc::new(NwsClient::from_config(client, config)),
        ))
    }
}

/// First `address` value in the query string, like `URLSearchParams::get`.
/// Repeated keys never reject the request.
fn first_address(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "address")
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/forecast", get(get_forecast))
        .route("/health", get(health))
        .with_state(state)
}

#[instrument(skip(state))]
async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ForecastApiResponse>, ForecastError> {
    let address = first_address(&params).ok_or(ForecastError::MissingAddress)?;

    let location = state.geocoder.resolve(address).await?;
    let periods = state.forecaster.forecast(&location).await?;
    let forecast = group_periods_by_day(&periods);

    info!(
        "Forecast for {} grouped into {} days",
        location.address,
        forecast.len()
    );

    Ok(Json(ForecastApiResponse {
        address: location.address,
        forecast,
    }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeocodedLocation, WeatherPeriod};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGeocoder(Option<GeocodedLocation>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _address: &str) -> Result<GeocodedLocation, ForecastError> {
            self.0.clone().ok_or(ForecastError::AddressNotFound)
        }
    }

    #[derive(Default)]
    struct CountingForecaster {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ForecastProvider for CountingForecaster {
        async fn forecast(
            &self,
            _location: &GeocodedLocation,
        ) -> Result<Vec<WeatherPeriod>, ForecastError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn query(address: Option<&str>) -> Query<Vec<(String, String)>> {
        Query(
            address
                .map(|a| vec![("address".to_string(), a.to_string())])
                .unwrap_or_default(),
        )
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_first_address_wins_over_repeats() {
        let params = pairs(&[("format", "json"), ("address", "first"), ("address", "second")]);
        assert_eq!(first_address(&params), Some("first"));
    }

    #[test]
    fn test_first_address_empty_or_absent() {
        assert_eq!(first_address(&pairs(&[("address", ""), ("address", "later")])), None);
        assert_eq!(first_address(&pairs(&[("city", "Chicago")])), None);
        assert_eq!(first_address(&[]), None);
    }

    #[tokio::test]
    async fn test_missing_address_short_circuits() {
        let forecaster = Arc::new(CountingForecaster::default());
        let state = AppState::new(Arc::new(FixedGeocoder(None)), forecaster.clone());

        let result = get_forecast(State(state), query(None)).await;

        assert!(matches!(result, Err(ForecastError::MissingAddress)));
        assert_eq!(forecaster.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geocoder_failure_skips_forecast() {
        let forecaster = Arc::new(CountingForecaster::default());
        let state = AppState::new(Arc::new(FixedGeocoder(None)), forecaster.clone());

        let result = get_forecast(State(state), query(Some("nowhere"))).await;

        assert!(matches!(result, Err(ForecastError::AddressNotFound)));
        assert_eq!(forecaster.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_forecast_keeps_matched_address() {
        let location = GeocodedLocation::new(38.895, -77.036, "MATCHED ADDRESS");
        let forecaster = Arc::new(CountingForecaster::default());
        let state = AppState::new(Arc::new(FixedGeocoder(Some(location))), forecaster.clone());

        let Json(response) = get_forecast(State(state), query(Some("1600 Penn")))
            .await
            .unwrap();

        assert_eq!(response.address, "MATCHED ADDRESS");
        assert!(response.forecast.is_empty());
        assert_eq!(forecaster.calls.load(Ordering::SeqCst), 1);
    }
}
