use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one location, in metric units as the provider sent them.
///
/// Timestamps are Unix epoch seconds; use the accessor methods for `DateTime` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub description: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub observed_at: i64,
}

impl WeatherSnapshot {
    pub fn sunrise_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunrise)
    }

    pub fn sunset_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunset)
    }

    pub fn observation_time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.observed_at)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
