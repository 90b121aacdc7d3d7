//! WMO weather interpretation codes as used by Open-Meteo.

/// Every code the forecast API can report, with its description.
pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "fair"),
    (1, "mainly clear"),
    (2, "partly cloudy"),
    (3, "overcast"),
    (45, "fog"),
    (48, "depositing rime fog"),
    (51, "light drizzle"),
    (53, "moderate drizzle"),
    (55, "dense drizzle"),
    (56, "light freezing drizzle"),
    (57, "dense freezing drizzle"),
    (61, "slight rain"),
    (63, "moderate rain"),
    (65, "heavy rain"),
    (66, "light freezing rain"),
    (67, "heavy freezing rain"),
    (71, "slight snow fall"),
    (73, "moderate snow fall"),
    (75, "heavy snow fall"),
    (77, "snow grains"),
    (80, "slight rain showers"),
    (81, "moderate rain showers"),
    (82, "heavy rain showers"),
    (85, "slight snow showers"),
    (86, "heavy snow showers"),
    (95, "slight to moderate thunderstorm"),
    (96, "thunderstorm with slight hail"),
    (99, "thunderstorm with heavy hail"),
];

/// Describe a weather code. Returns `None` for codes outside the table.
pub fn convert_weather_code(code: i64) -> Option<&'static str> {
    WEATHER_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| WEATHER_CODES[idx].1)
}
