use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    Config, OpenMeteoError,
    transport::{HttpTransport, ReqwestTransport},
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the forecast and geocoding endpoints.
///
/// Holds no state between calls; each operation is one GET.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient<T = ReqwestTransport> {
    transport: T,
    forecast_url: String,
    geocoding_url: String,
}

impl OpenMeteoClient {
    /// Client against the public endpoints with the default timeout.
    pub fn new() -> Result<Self, OpenMeteoError> {
        let transport = ReqwestTransport::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?;
        Ok(Self::with_transport(transport))
    }

    /// Client using the endpoints and timeout stored in `config`.
    pub fn from_config(config: &Config) -> Result<Self, OpenMeteoError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(transport)
            .with_endpoints(config.forecast_url.clone(), config.geocoding_url.clone()))
    }
}

impl<T: HttpTransport> OpenMeteoClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            forecast_url: FORECAST_URL.to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at other base URLs, e.g. a self-hosted instance.
    pub fn with_endpoints(mut self, forecast_url: String, geocoding_url: String) -> Self {
        self.forecast_url = forecast_url;
        self.geocoding_url = geocoding_url;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn forecast_base(&self) -> &str {
        &self.forecast_url
    }

    pub fn geocoding_base(&self) -> &str {
        &self.geocoding_url
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, OpenMeteoError> {
        debug!(url = %url, "GET");

        let body = self.transport.get(url).await?;

        serde_json::from_str(&body).map_err(|e| OpenMeteoError::Decode(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::stub::StubTransport;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let client = OpenMeteoClient::with_transport(StubTransport::default());

        assert_eq!(client.forecast_base(), FORECAST_URL);
        assert_eq!(client.geocoding_base(), GEOCODING_URL);
    }

    #[test]
    fn from_config_uses_configured_endpoints() {
        let cfg = Config {
            forecast_url: "http://localhost:8080/v1/forecast".into(),
            geocoding_url: "http://localhost:8081/v1/search".into(),
            ..Config::default()
        };

        let client = OpenMeteoClient::from_config(&cfg).expect("client must build");
        assert_eq!(client.forecast_base(), "http://localhost:8080/v1/forecast");
        assert_eq!(client.geocoding_base(), "http://localhost:8081/v1/search");
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let client = OpenMeteoClient::with_transport(StubTransport::new("u", "not json"));

        let err = client.get_json::<serde_json::Value>("u").await.unwrap_err();
        assert!(matches!(err, OpenMeteoError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let client = OpenMeteoClient::with_transport(StubTransport::new("u", "{}"));

        let err = client.get_json::<serde_json::Value>("other").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
