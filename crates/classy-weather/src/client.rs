use reqwest::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::geocode::GeocodingClient;
use crate::provider::ForecastProvider;
use crate::types::{ForecastSeries, ResolvedPlace, WeatherError};

const USER_AGENT: &str = concat!("classy-weather/", env!("CARGO_PKG_VERSION"));

/// Geocoding and forecast lookups sharing one HTTP connection pool.
///
/// No request timeout is set; a stalled lookup ends only when the caller
/// cancels it.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    geocoder: GeocodingClient,
    forecast: ForecastProvider,
}

impl WeatherClient {
    pub fn new(geocoding_url: &str, forecast_url: &str) -> Result<Self, WeatherError> {
        let client = Arc::new(Client::builder().user_agent(USER_AGENT).build()?);

        Ok(Self {
            geocoder: GeocodingClient::new(client.clone(), geocoding_url),
            forecast: ForecastProvider::new(client, forecast_url),
        })
    }

    pub async fn resolve(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolvedPlace, WeatherError> {
        self.geocoder.resolve(query, cancel).await
    }

    pub async fn forecast(
        &self,
        place: &ResolvedPlace,
        cancel: &CancellationToken,
    ) -> Result<ForecastSeries, WeatherError> {
        self.forecast
            .fetch(place.latitude, place.longitude, &place.timezone, cancel)
            .await
    }
}
