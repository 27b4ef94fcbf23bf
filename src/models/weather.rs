//! Forecast period as delivered by the National Weather Service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One day or night interval of an NWS forecast.
///
/// Passed through to clients untouched; only `start_time` and `is_daytime`
/// are interpreted when grouping periods into days.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPeriod {
    pub number: u32,
    /// Upstream label such as "Tonight" or "Saturday"
    pub name: String,
    /// ISO-8601 timestamp including the forecast office offset
    pub start_time: String,
    pub end_time: String,
    pub is_daytime: bool,
    /// Kept as the raw JSON number so integers round-trip unchanged
    pub temperature: Number,
    pub temperature_unit: String,
    pub temperature_trend: Option<String>,
    pub wind_speed: String,
    pub wind_direction: String,
    pub icon: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    /// Fields not listed above, e.g. `probabilityOfPrecipitation`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_nws_period() {
        let raw = json!({
            "number": 1,
            "name": "Today",
            "startTime": "2023-12-01T06:00:00-05:00",
            "endTime": "2023-12-01T18:00:00-05:00",
            "isDaytime": true,
            "temperature": 45,
            "temperatureUnit": "F",
            "temperatureTrend": null,
            "windSpeed": "5 mph",
            "windDirection": "NW",
            "icon": "https://api.weather.gov/icons/land/day/few?size=medium",
            "shortForecast": "Sunny",
            "detailedForecast": "Sunny day with clear skies.",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 20 }
        });

        let period: WeatherPeriod = serde_json::from_value(raw.clone()).unwrap();
        assert!(period.is_daytime);
        assert_eq!(period.start_time, "2023-12-01T06:00:00-05:00");
        assert!(period.temperature_trend.is_none());
        assert_eq!(
            period.extra["probabilityOfPrecipitation"]["value"],
            json!(20)
        );

        // integer temperatures stay integers and unknown fields survive
        assert_eq!(serde_json::to_value(&period).unwrap(), raw);
    }
}
