//! Grouped forecast and response payloads returned by the HTTP API

use super::WeatherPeriod;
use serde::{Deserialize, Serialize};

/// One calendar day holding at most one daytime and one nighttime period
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupedWeatherDay {
    /// "Today" for the first day, otherwise the upstream period name
    pub day_name: String,
    /// Short display date, e.g. "Dec 1"
    pub date: String,
    pub day_period: Option<WeatherPeriod>,
    pub night_period: Option<WeatherPeriod>,
}

/// Successful response of `GET /api/forecast`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastApiResponse {
    /// Address as matched by the geocoder
    pub address: String,
    pub forecast: Vec<GroupedWeatherDay>,
}

/// Error response of `GET /api/forecast`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ForecastErrorResponse {
    #[must_use]
    pub fn new(error: &str, suggestions: &[&str]) -> Self {
        Self {
            error: error.to_string(),
            suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
