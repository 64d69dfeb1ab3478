use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use mgm_weather_core::WeatherSnapshot;

/// Format a snapshot for the terminal. Missing values print as `-`.
pub fn snapshot_table<Tz: TimeZone>(
    snapshot: &WeatherSnapshot,
    retrieved_at: DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();

    let condition = if snapshot.condition.is_empty() { "-" } else { snapshot.condition.as_str() };

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}  ({})", snapshot.location, retrieved_at.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "  Condition:   {condition}");
    let _ = writeln!(out, "  Temperature: {}", value(snapshot.temp, "°C"));
    let _ = writeln!(out, "  Humidity:    {}", value(snapshot.humidity, "%"));
    let _ = writeln!(out, "  Wind:        {}", value(snapshot.wind, " km/h"));
    let _ = writeln!(out, "  Pressure:    {}", value(snapshot.pressure, " hPa"));

    if !snapshot.forecast.is_empty() {
        let _ = writeln!(out, "\n  Forecast:");
        for day in &snapshot.forecast {
            let _ = writeln!(
                out,
                "    {:<12} {:>8} / {:<8} {}",
                day.day,
                value(day.min_temp, "°C"),
                value(day.max_temp, "°C"),
                day.condition,
            );
        }
    }

    out
}

fn value(v: Option<f64>, unit: &str) -> String {
    match v {
        Some(v) => format!("{v:.1}{unit}"),
        None => "-".to_string(),
    }
}
