//! Error types and user-facing error classification for the forecast service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ForecastErrorResponse;

/// Every way the address to forecast pipeline can fail
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The request carried no address
    #[error("Address parameter is required")]
    MissingAddress,

    /// The geocoder answered but matched nothing
    #[error("ADDRESS_NOT_FOUND")]
    AddressNotFound,

    /// The geocoder could not be reached or answered with a failure status
    #[error("Failed to geocode address")]
    AddressLookupFailed {
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The NWS points lookup rejected the coordinates
    #[error("LOCATION_NOT_SUPPORTED")]
    LocationNotSupported,

    /// The points lookup worked but the forecast document did not
    #[error("FORECAST_UNAVAILABLE")]
    ForecastUnavailable,

    /// Raw transport or decoding failure outside the geocoding stage
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Anything else that went wrong
    #[error("{0}")]
    Unexpected(String),
}

impl ForecastError {
    /// Create a new lookup failure for a non-success geocoder status
    #[must_use]
    pub fn lookup_failed() -> Self {
        Self::AddressLookupFailed { source: None }
    }

    /// The request itself was wrong; nothing upstream failed
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::MissingAddress)
    }

    /// Create a new untyped error
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected(message.into())
    }
}

const MISSING_ADDRESS: &str = "Address parameter is required";

const ADDRESS_NOT_FOUND: &str = "Address not found. Please try a specific street address with a house number (e.g., \"123 Main Street, Chicago, IL\" or \"1600 Pennsylvania Avenue, Washington, DC\"). Landmarks, intersections, or area names may not work.";
const ADDRESS_NOT_FOUND_SUGGESTIONS: [&str; 4] = [
    "Include a house or building number",
    "Use full street names (e.g., \"Street\" instead of \"St\")",
    "Try adding the ZIP code",
    "Avoid landmarks or area names - use specific addresses",
];

const LOCATION_NOT_SUPPORTED: &str = "This location may be outside the US or in an area not covered by the National Weather Service";
const LOCATION_NOT_SUPPORTED_SUGGESTIONS: [&str; 2] = [
    "Ensure the address is within the United States",
    "Try a different address within the US",
];

const FORECAST_UNAVAILABLE: &str = "Weather forecast is temporarily unavailable for this location";
const FORECAST_UNAVAILABLE_SUGGESTIONS: [&str; 2] = [
    "Try again in a few minutes",
    "Weather service may be temporarily down",
];

const GEOCODE_FAILED: &str = "Unable to find the address. Please check the spelling and try a complete street address with house number.";
const GEOCODE_FAILED_SUGGESTIONS: [&str; 3] = [
    "Example: \"123 Main Street, Chicago, IL 60601\"",
    "Include house number, street name, city, and state",
    "Avoid abbreviations when possible",
];

const GENERIC_FAILURE: &str = "Failed to get weather forecast. Please try again.";
const GENERIC_FAILURE_SUGGESTIONS: [&str; 3] = [
    "Check your internet connection",
    "Try a different address",
    "Contact support if the problem persists",
];

/// Map a failure to the status code and message shown to the user.
///
/// Typed variants are matched first. Untyped failures whose message mentions
/// "geocode" are still reported as an address problem, since nothing else
/// tells a geocoder transport failure apart from other transport failures.
/// A stronger signal would let this fallback go away.
#[must_use]
pub fn classify(error: &ForecastError) -> (StatusCode, ForecastErrorResponse) {
    match error {
        ForecastError::MissingAddress => (
            StatusCode::BAD_REQUEST,
            ForecastErrorResponse::new(MISSING_ADDRESS, &[]),
        ),
        ForecastError::AddressNotFound => (
            StatusCode::NOT_FOUND,
            ForecastErrorResponse::new(ADDRESS_NOT_FOUND, &ADDRESS_NOT_FOUND_SUGGESTIONS),
        ),
        ForecastError::LocationNotSupported => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ForecastErrorResponse::new(LOCATION_NOT_SUPPORTED, &LOCATION_NOT_SUPPORTED_SUGGESTIONS),
        ),
        ForecastError::ForecastUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            ForecastErrorResponse::new(FORECAST_UNAVAILABLE, &FORECAST_UNAVAILABLE_SUGGESTIONS),
        ),
        ForecastError::AddressLookupFailed { .. } => geocode_failed(),
        ForecastError::Transport(_) | ForecastError::Unexpected(_) => {
            if error.to_string().contains("geocode") {
                geocode_failed()
            } else {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ForecastErrorResponse::new(GENERIC_FAILURE, &GENERIC_FAILURE_SUGGESTIONS),
                )
            }
        }
    }
}

fn geocode_failed() -> (StatusCode, ForecastErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ForecastErrorResponse::new(GEOCODE_FAILED, &GEOCODE_FAILED_SUGGESTIONS),
    )
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        if self.is_caller_error() {
            tracing::debug!("Rejected forecast request: {}", self);
        } else {
            tracing::error!(error = ?self, "Forecast API error: {}", self);
        }
        let (status, body) = classify(&self);
        (status, Json(body)).into_response()
    }
}
