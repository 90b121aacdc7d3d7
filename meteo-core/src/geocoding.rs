//! Geocoding endpoint: place-name search.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    OpenMeteoClient, OpenMeteoError,
    transport::HttpTransport,
    url::{QueryParams, build_url},
};

/// Place-name search. A bare string converts into a query with only `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodingQuery {
    pub name: String,
    pub count: Option<u32>,
    pub language: Option<String>,
}

impl GeocodingQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), count: None, language: None }
    }

    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("name", &self.name)
            .push_opt("count", self.count)
            .push_opt("language", self.language.as_deref());
        params
    }
}

impl From<&str> for GeocodingQuery {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for GeocodingQuery {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub feature_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_id: Option<u64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub postcodes: Option<Vec<String>>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub admin2: Option<String>,
    #[serde(default)]
    pub admin3: Option<String>,
    #[serde(default)]
    pub admin4: Option<String>,
    #[serde(default)]
    pub admin1_id: Option<u64>,
    #[serde(default)]
    pub admin2_id: Option<u64>,
    #[serde(default)]
    pub admin3_id: Option<u64>,
    #[serde(default)]
    pub admin4_id: Option<u64>,
}

impl Geolocation {
    /// "Name, Admin1, Country", skipping parts upstream did not send.
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResponse {
    /// Empty when nothing matched; upstream omits the key in that case.
    #[serde(default)]
    pub results: Vec<Geolocation>,
    pub generationtime_ms: f64,
}

impl<T: HttpTransport> OpenMeteoClient<T> {
    pub fn geocoding_url(&self, query: &GeocodingQuery) -> String {
        build_url(self.geocoding_base(), &query.to_query())
    }

    #[instrument(skip_all, fields(name = %query.name))]
    async fn search(&self, query: &GeocodingQuery) -> Result<GeocodingResponse, OpenMeteoError> {
        let url = self.geocoding_url(query);
        self.get_json(&url).await
    }

    pub async fn query_geocoding(
        &self,
        query: impl Into<GeocodingQuery>,
    ) -> Result<GeocodingResponse, OpenMeteoError> {
        self.search(&query.into()).await
    }
}

/// One-off geocoding call against the public endpoint.
pub async fn query_geocoding(
    query: impl Into<GeocodingQuery>,
) -> Result<GeocodingResponse, OpenMeteoError> {
    OpenMeteoClient::new()?.query_geocoding(query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GEOCODING_URL, client::stub::StubTransport};

    const BERLIN: &str = r#"{
        "results": [
            {
                "id": 2950159,
                "name": "Berlin",
                "latitude": 52.52437,
                "longitude": 13.41053,
                "elevation": 74.0,
                "feature_code": "PPLC",
                "country_code": "DE",
                "admin1_id": 2950157,
                "admin3_id": 6547383,
                "admin4_id": 6547539,
                "timezone": "Europe/Berlin",
                "population": 3426354,
                "postcodes": ["10967", "13347"],
                "country_id": 2921044,
                "country": "Germany",
                "admin1": "Land Berlin",
                "admin3": "Berlin, Stadt",
                "admin4": "Berlin"
            }
        ],
        "generationtime_ms": 0.8579493
    }"#;

    #[test]
    fn bare_string_and_structured_query_match() {
        let client = OpenMeteoClient::with_transport(StubTransport::default());

        let bare = client.geocoding_url(&"Berlin".into());
        let structured = client.geocoding_url(&GeocodingQuery::new("Berlin"));

        assert_eq!(bare, structured);
        assert_eq!(bare, "https://geocoding-api.open-meteo.com/v1/search?name=Berlin");
    }

    #[test]
    fn optional_fields_follow_name() {
        let query = GeocodingQuery::new("Zürich").count(5).language("de");

        assert_eq!(
            build_url(GEOCODING_URL, &query.to_query()),
            "https://geocoding-api.open-meteo.com/v1/search?name=Z%C3%BCrich&count=5&language=de"
        );
    }

    #[tokio::test]
    async fn bare_and_structured_calls_issue_the_same_request() {
        let url = "https://geocoding-api.open-meteo.com/v1/search?name=Berlin";
        let client = OpenMeteoClient::with_transport(StubTransport::new(url, BERLIN));

        let a = client.query_geocoding("Berlin").await.expect("bare");
        let b = client.query_geocoding(GeocodingQuery::new("Berlin")).await.expect("structured");

        assert_eq!(a, b);
        assert_eq!(client.transport().requested(), vec![url.to_string(), url.to_string()]);
    }

    #[tokio::test]
    async fn decodes_geolocation_fields() {
        let url = "https://geocoding-api.open-meteo.com/v1/search?name=Berlin";
        let client = OpenMeteoClient::with_transport(StubTransport::new(url, BERLIN));

        let resp = client.query_geocoding("Berlin").await.expect("stubbed search");
        assert_eq!(resp.results.len(), 1);

        let berlin = &resp.results[0];
        assert_eq!(berlin.id, 2950159);
        assert_eq!(berlin.country_code.as_deref(), Some("DE"));
        assert_eq!(berlin.admin2, None);
        assert_eq!(berlin.admin4_id, Some(6547539));
        assert_eq!(berlin.postcodes.as_ref().map(Vec::len), Some(2));
        assert_eq!(berlin.display_name(), "Berlin, Land Berlin, Germany");
    }

    #[tokio::test]
    async fn missing_results_key_means_no_matches() {
        let url = "https://geocoding-api.open-meteo.com/v1/search?name=Nowhere";
        let client =
            OpenMeteoClient::with_transport(StubTransport::new(url, r#"{"generationtime_ms": 0.5}"#));

        let resp = client.query_geocoding("Nowhere").await.expect("empty search");
        assert!(resp.results.is_empty());
    }
}
