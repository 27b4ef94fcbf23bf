//! Geocoded location model

use serde::{Deserialize, Serialize};

/// A street address matched by the geocoder, with its coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodedLocation {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonicalized address as returned by the geocoder
    pub address: String,
}

impl GeocodedLocation {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
        }
    }

    /// Format as the `lat,lon` pair used by the NWS points endpoint
    #[must_use]
    pub fn point_path(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}
