use chrono::{DateTime, Local, Utc};
use cityweather_core::WeatherSnapshot;
use std::fmt::Write;

const UPDATED_FORMAT: &str = "%d/%m/%Y %I:%M %p";
const CLOCK_FORMAT: &str = "%I:%M %p";

/// Detail view for one snapshot, in local time.
pub fn detail(snapshot: &WeatherSnapshot) -> String {
    let local = |t: Option<DateTime<Utc>>, fmt: &str| {
        t.map(|t| t.with_timezone(&Local).format(fmt).to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    detail_with(snapshot, local)
}

fn detail_with(
    snapshot: &WeatherSnapshot,
    fmt_time: impl Fn(Option<DateTime<Utc>>, &str) -> String,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}, {}", snapshot.city, snapshot.country);
    let _ = writeln!(out, "Updated at: {}", fmt_time(snapshot.observation_time(), UPDATED_FORMAT));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", snapshot.description);
    let _ = writeln!(out, "Temperature: {}°C", snapshot.temperature_c);
    let _ = writeln!(out, "Min temp:    {}°C", snapshot.temperature_min_c);
    let _ = writeln!(out, "Max temp:    {}°C", snapshot.temperature_max_c);
    let _ = writeln!(out);
    let _ = writeln!(out, "Sunrise:     {}", fmt_time(snapshot.sunrise_time(), CLOCK_FORMAT));
    let _ = writeln!(out, "Sunset:      {}", fmt_time(snapshot.sunset_time(), CLOCK_FORMAT));
    let _ = writeln!(out, "Wind:        {} m/s", snapshot.wind_speed_mps);
    let _ = writeln!(out, "Pressure:    {} hPa", snapshot.pressure_hpa);
    let _ = writeln!(out, "Humidity:    {}%", snapshot.humidity_pct);

    out
}
