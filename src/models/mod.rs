//! Data models for the forecast service
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geocoded address and coordinates
//! - Weather: Forecast periods as delivered by the weather service
//! - Forecast: Day grouping and HTTP response payloads

pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{ForecastApiResponse, ForecastErrorResponse, GroupedWeatherDay};
pub use location::GeocodedLocation;
pub use weather::WeatherPeriod;
