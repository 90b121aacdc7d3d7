//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Query-string construction for the Open-Meteo APIs
//! - Forecast and geocoding clients over a swappable HTTP transport
//! - WMO weather-code descriptions
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

mod client;
pub mod config;
mod error;
pub mod forecast;
pub mod geocoding;
pub mod transport;
pub mod url;
pub mod weather_code;

pub use client::{DEFAULT_TIMEOUT_SECS, FORECAST_URL, GEOCODING_URL, OpenMeteoClient};
pub use config::{Config, SavedLocation};
pub use error::OpenMeteoError;
pub use forecast::{CurrentWeather, ForecastRequest, ForecastResponse, ForecastTime, forecast};
pub use geocoding::{GeocodingQuery, GeocodingResponse, Geolocation, query_geocoding};
pub use transport::{HttpTransport, ReqwestTransport};
pub use url::{QueryParams, build_url};
pub use weather_code::convert_weather_code;
