//! Forward geocoding: resolve a free-text place name to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::request::get_json;
use crate::types::{ResolvedPlace, WeatherError};

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    country_code: String,
}

impl From<GeocodingResult> for ResolvedPlace {
    fn from(result: GeocodingResult) -> Self {
        Self {
            flag: country_flag(&result.country_code),
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone,
            name: result.name,
            country_code: result.country_code,
        }
    }
}

/// Two-letter country code to regional-indicator flag ("de" and "DE" both give 🇩🇪).
///
/// Each letter maps to code point 127397 + its uppercase ASCII value.
pub fn country_flag(country_code: &str) -> String {
    country_code
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter_map(|c| char::from_u32(127_397 + c as u32))
        .collect()
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolve `name` to the best (first) match.
    ///
    /// Fails with [`WeatherError::NotFound`] when the service has no results.
    #[instrument(skip(self, cancel), level = "info")]
    pub async fn resolve(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedPlace, WeatherError> {
        let request = self.client.get(&self.base_url).query(&[("name", name)]);
        let body: GeocodingResponse = get_json(request, cancel).await?;

        let first = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(name.to_string()))?;

        let place = ResolvedPlace::from(first);
        tracing::info!(
            "Resolved {:?} to {} ({:.4}, {:.4}, {})",
            name,
            place.name,
            place.latitude,
            place.longitude,
            place.timezone
        );
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeocodingClient {
        GeocodingClient::new(
            Arc::new(Client::new()),
            format!("{}/v1/search", server.uri()),
        )
    }

    #[test]
    fn test_country_flag_is_case_insensitive() {
        assert_eq!(country_flag("fr"), country_flag("FR"));
        assert_eq!(country_flag("FR"), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(country_flag("DE").chars().count(), 2);
    }

    #[test]
    fn test_country_flag_empty_code() {
        assert_eq!(country_flag(""), "");
    }

    #[tokio::test]
    async fn test_resolve_takes_first_result() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Berlin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"id": 2950159, "name": "Berlin", "latitude": 52.52437, "longitude": 13.41053,
                     "timezone": "Europe/Berlin", "country_code": "DE", "country": "Germany"},
                    {"id": 4348460, "name": "Berlin", "latitude": 38.32262, "longitude": -75.21769,
                     "timezone": "America/New_York", "country_code": "US"}
                ],
                "generationtime_ms": 0.5
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server)
            .resolve("Berlin", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(place.name, "Berlin");
        assert_eq!(place.country_code, "DE");
        assert_eq!(place.timezone, "Europe/Berlin");
        assert_eq!(place.display_name(), "Berlin 🇩🇪");
    }

    #[tokio::test]
    async fn test_resolve_encodes_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("name", "São Paulo & Co"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"name": "São Paulo", "latitude": -23.5475, "longitude": -46.63611,
                             "timezone": "America/Sao_Paulo", "country_code": "BR"}]
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server)
            .resolve("São Paulo & Co", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(place.name, "São Paulo");
    }

    #[tokio::test]
    async fn test_resolve_missing_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .resolve("Xyzzyplace123", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Xyzzyplace123"));
    }

    #[tokio::test]
    async fn test_resolve_empty_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .resolve("Nowhere", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
