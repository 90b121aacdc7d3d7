//! Forecast endpoint: request parameters, response shape and the call itself.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{
    OpenMeteoClient, OpenMeteoError,
    transport::HttpTransport,
    url::{QueryParams, build_url},
    weather_code::convert_weather_code,
};

pub mod options;

pub use options::{
    CellSelection, DailyVariable, HourlyVariable, PastDays, PrecipitationUnit, TemperatureUnit,
    TimeFormat, WindSpeedUnit,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub hourly: Option<Vec<HourlyVariable>>,
    pub daily: Option<Vec<DailyVariable>>,
    pub current_weather: Option<bool>,
    pub temperature_unit: Option<TemperatureUnit>,
    pub windspeed_unit: Option<WindSpeedUnit>,
    pub precipitation_unit: Option<PrecipitationUnit>,
    pub timeformat: Option<TimeFormat>,
    pub timezone: Option<String>,
    pub past_days: Option<PastDays>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cell_selection: Option<CellSelection>,
}

impl ForecastRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            hourly: None,
            daily: None,
            current_weather: None,
            temperature_unit: None,
            windspeed_unit: None,
            precipitation_unit: None,
            timeformat: None,
            timezone: None,
            past_days: None,
            start_date: None,
            end_date: None,
            cell_selection: None,
        }
    }

    #[must_use]
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    #[must_use]
    pub fn hourly(mut self, vars: impl IntoIterator<Item = HourlyVariable>) -> Self {
        self.hourly = Some(vars.into_iter().collect());
        self
    }

    #[must_use]
    pub fn daily(mut self, vars: impl IntoIterator<Item = DailyVariable>) -> Self {
        self.daily = Some(vars.into_iter().collect());
        self
    }

    #[must_use]
    pub fn current_weather(mut self, enabled: bool) -> Self {
        self.current_weather = Some(enabled);
        self
    }

    #[must_use]
    pub fn temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.temperature_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn windspeed_unit(mut self, unit: WindSpeedUnit) -> Self {
        self.windspeed_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn precipitation_unit(mut self, unit: PrecipitationUnit) -> Self {
        self.precipitation_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn timeformat(mut self, format: TimeFormat) -> Self {
        self.timeformat = Some(format);
        self
    }

    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[must_use]
    pub fn past_days(mut self, days: PastDays) -> Self {
        self.past_days = Some(days);
        self
    }

    #[must_use]
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn cell_selection(mut self, selection: CellSelection) -> Self {
        self.cell_selection = Some(selection);
        self
    }

    /// Query parameters in wire order. Absent fields and empty variable
    /// lists produce no entry.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("latitude", self.latitude)
            .push("longitude", self.longitude)
            .push_opt("elevation", self.elevation)
            .push_list("hourly", self.hourly.as_deref().unwrap_or_default())
            .push_list("daily", self.daily.as_deref().unwrap_or_default())
            .push_opt("current_weather", self.current_weather)
            .push_opt("temperature_unit", self.temperature_unit)
            .push_opt("windspeed_unit", self.windspeed_unit)
            .push_opt("precipitation_unit", self.precipitation_unit)
            .push_opt("timeformat", self.timeformat)
            .push_opt("timezone", self.timezone.as_deref())
            .push_opt("past_days", self.past_days)
            .push_opt("start_date", self.start_date.map(|d| d.format("%Y-%m-%d")))
            .push_opt("end_date", self.end_date.map(|d| d.format("%Y-%m-%d")))
            .push_opt("cell_selection", self.cell_selection);
        params
    }
}

/// Decoded forecast body.
///
/// Top-level keys without a dedicated field are kept in `extra`, so nothing
/// upstream sends is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub elevation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<BTreeMap<String, Vec<Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_units: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<BTreeMap<String, Vec<Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_units: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_weather: Option<CurrentWeather>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ForecastResponse {
    pub fn hourly_series(&self, name: &str) -> Option<&[Value]> {
        self.hourly.as_ref()?.get(name).map(Vec::as_slice)
    }

    pub fn daily_series(&self, name: &str) -> Option<&[Value]> {
        self.daily.as_ref()?.get(name).map(Vec::as_slice)
    }

    pub fn hourly_unit(&self, name: &str) -> Option<&str> {
        self.hourly_units.as_ref()?.get(name).map(String::as_str)
    }

    pub fn daily_unit(&self, name: &str) -> Option<&str> {
        self.daily_units.as_ref()?.get(name).map(String::as_str)
    }
}

/// A time value as sent upstream: ISO 8601 text by default, epoch seconds
/// when the request asked for `timeformat=unixtime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastTime {
    Iso8601(String),
    Unix(i64),
}

impl std::fmt::Display for ForecastTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastTime::Iso8601(text) => f.write_str(text),
            ForecastTime::Unix(secs) => write!(f, "{secs}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub time: ForecastTime,
    pub temperature: f64,
    pub weathercode: i64,
    pub windspeed: f64,
    pub winddirection: f64,
}

impl CurrentWeather {
    /// Label for `weathercode`, if it is a known code.
    pub fn description(&self) -> Option<&'static str> {
        convert_weather_code(self.weathercode)
    }
}

impl<T: HttpTransport> OpenMeteoClient<T> {
    /// URL a [`forecast`](Self::forecast) call for `request` would fetch.
    pub fn forecast_url(&self, request: &ForecastRequest) -> String {
        build_url(self.forecast_base(), &request.to_query())
    }

    #[instrument(skip(self, request), fields(lat = %request.latitude, lon = %request.longitude))]
    pub async fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, OpenMeteoError> {
        let url = self.forecast_url(request);
        self.get_json(&url).await
    }
}

/// One-off forecast call against the public endpoint.
pub async fn forecast(request: &ForecastRequest) -> Result<ForecastResponse, OpenMeteoError> {
    OpenMeteoClient::new()?.forecast(request).await
}
