//! Turns the flat NWS period list into calendar-day cards

use chrono::{DateTime, NaiveDateTime};
use tracing::warn;

use crate::models::{GroupedWeatherDay, WeatherPeriod};

/// Number of day cards returned to clients
pub const MAX_FORECAST_DAYS: usize = 7;

const FIRST_DAY_NAME: &str = "Today";
const INVALID_DATE: &str = "Invalid Date";
const DISPLAY_FORMAT: &str = "%b %-d";

/// Format an ISO-8601 timestamp as a short label such as "Dec 1".
///
/// The calendar date is taken in the timestamp's own offset, so two instants
/// that differ only in offset can land on different days.
#[must_use]
pub fn format_date(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.format(DISPLAY_FORMAT).to_string();
    }

    match NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        Err(e) => {
            warn!("Unparseable period timestamp {:?}: {}", timestamp, e);
            INVALID_DATE.to_string()
        }
    }
}

struct DayBucket<'a> {
    date: String,
    day: Option<&'a WeatherPeriod>,
    night: Option<&'a WeatherPeriod>,
}

impl DayBucket<'_> {
    fn name(&self) -> &str {
        self.day
            .or(self.night)
            .map(|p| p.name.as_str())
            .unwrap_or_default()
    }
}

/// Group periods into at most [`MAX_FORECAST_DAYS`] calendar days.
///
/// Buckets appear in the order their date is first seen, not in calendar
/// order. A later period with the same date and day/night flag replaces the
/// earlier one. The first bucket is always named "Today".
#[must_use]
pub fn group_periods_by_day(periods: &[WeatherPeriod]) -> Vec<GroupedWeatherDay> {
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for period in periods {
        let date = format_date(&period.start_time);

        let index = match buckets.iter().position(|b| b.date == date) {
            Some(index) => index,
            None => {
                buckets.push(DayBucket {
                    date,
                    day: None,
                    night: None,
                });
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[index];
        if period.is_daytime {
            bucket.day = Some(period);
        } else {
            bucket.night = Some(period);
        }
    }

    buckets
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .enumerate()
        .map(|(index, bucket)| GroupedWeatherDay {
            day_name: if index == 0 {
                FIRST_DAY_NAME.to_string()
            } else {
                bucket.name().to_string()
            },
            day_period: bucket.day.cloned(),
            night_period: bucket.night.cloned(),
            date: bucket.date,
        })
        .collect()
}
