//! `addresscast` - 7-day weather forecast for a US street address
//!
//! An address is geocoded through the US Census geocoder, the coordinates
//! are resolved to a National Weather Service forecast, and the forecast
//! periods are grouped into day/night cards served over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod grouping;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use crate::config::ForecastConfig;
pub use error::{ForecastError, classify};
pub use geocoding::{CensusGeocoder, Geocoder};
pub use grouping::{format_date, group_periods_by_day};
pub use models::{
    ForecastApiResponse, ForecastErrorResponse, GeocodedLocation, GroupedWeatherDay,
    WeatherPeriod,
};
pub use weather::{ForecastProvider, NwsClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
