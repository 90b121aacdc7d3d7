//! Plain-text rendering of API responses.

use meteo_core::{ForecastResponse, Geolocation, convert_weather_code};
use serde_json::Value;
use std::{collections::BTreeMap, fmt::Write};

pub fn render_forecast(label: &str, forecast: &ForecastResponse) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{label} ({:.2}, {:.2}), {:.0} m, {} ({})",
        forecast.latitude,
        forecast.longitude,
        forecast.elevation,
        forecast.timezone,
        forecast.timezone_abbreviation,
    );

    if let Some(current) = &forecast.current_weather {
        let _ = writeln!(
            out,
            "Now ({}): {:.1}°, {}, wind {:.1} from {:.0}°",
            current.time,
            current.temperature,
            current.description().unwrap_or("unknown conditions"),
            current.windspeed,
            current.winddirection,
        );
    }

    if let Some(daily) = &forecast.daily {
        out.push_str("\nDaily\n");
        out.push_str(&render_series(daily, forecast.daily_units.as_ref()));
    }

    if let Some(hourly) = &forecast.hourly {
        out.push_str("\nHourly\n");
        out.push_str(&render_series(hourly, forecast.hourly_units.as_ref()));
    }

    out
}

/// Tab-separated table with `time` first and one column per remaining series.
fn render_series(
    block: &BTreeMap<String, Vec<Value>>,
    units: Option<&BTreeMap<String, String>>,
) -> String {
    let mut columns: Vec<&str> = Vec::with_capacity(block.len());
    if block.contains_key("time") {
        columns.push("time");
    }
    columns.extend(block.keys().map(String::as_str).filter(|k| *k != "time"));

    let header = columns
        .iter()
        .map(|name| match units.and_then(|u| u.get(*name)) {
            Some(unit) if !unit.is_empty() && *name != "time" => format!("{name} ({unit})"),
            _ => name.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\t");

    let rows = block.values().map(Vec::len).max().unwrap_or(0);
    let mut out = header;
    out.push('\n');

    for idx in 0..rows {
        let row = columns
            .iter()
            .map(|name| {
                let value = block[*name].get(idx).unwrap_or(&Value::Null);
                if *name == "weathercode" { format_code(value) } else { format_value(value) }
            })
            .collect::<Vec<_>>()
            .join("\t");
        out.push_str(&row);
        out.push('\n');
    }

    out
}

pub fn render_places(places: &[Geolocation]) -> String {
    if places.is_empty() {
        return "No matching places.\n".to_string();
    }

    let mut out = String::new();
    for place in places {
        let _ = write!(
            out,
            "{:>10}  {:<50} {:>9.4} {:>10.4}",
            place.id,
            place.display_name(),
            place.latitude,
            place.longitude,
        );
        if let Some(population) = place.population {
            let _ = write!(out, "  pop. {population}");
        }
        out.push('\n');
    }
    out
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_code(value: &Value) -> String {
    match value.as_i64().and_then(convert_weather_code) {
        Some(label) => format!("{} ({label})", format_value(value)),
        None => format_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ForecastResponse {
        serde_json::from_value(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.41,
            "utc_offset_seconds": 3600,
            "timezone": "Europe/Berlin",
            "timezone_abbreviation": "CET",
            "elevation": 38.0,
            "current_weather": {
                "time": "2024-01-15T12:00",
                "temperature": 5.5,
                "weathercode": 3,
                "windspeed": 12.5,
                "winddirection": 225.0
            },
            "daily_units": { "time": "iso8601", "temperature_2m_max": "°C", "weathercode": "wmo code" },
            "daily": {
                "weathercode": [61, 1234],
                "time": ["2024-01-15", "2024-01-16"],
                "temperature_2m_max": [8.0, null]
            }
        }))
        .expect("fixture decodes")
    }

    #[test]
    fn forecast_header_and_current_conditions() {
        let text = render_forecast("Berlin", &sample());

        assert!(text.starts_with("Berlin (52.52, 13.41), 38 m, Europe/Berlin (CET)\n"));
        assert!(text.contains("Now (2024-01-15T12:00): 5.5°, overcast, wind 12.5 from 225°"));
    }

    #[test]
    fn daily_table_puts_time_first_and_labels_codes() {
        let text = render_forecast("Berlin", &sample());
        let table: Vec<&str> = text.split("Daily\n").nth(1).expect("daily section").lines().collect();

        assert_eq!(table[0], "time\ttemperature_2m_max (°C)\tweathercode (wmo code)");
        assert_eq!(table[1], "2024-01-15\t8.0\t61 (slight rain)");
        assert_eq!(table[2], "2024-01-16\t-\t1234");
    }

    #[test]
    fn no_places() {
        assert_eq!(render_places(&[]), "No matching places.\n");
    }
}
