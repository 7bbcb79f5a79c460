//! Daily forecast lookup against the Open-Meteo forecast API.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::request::get_json;
use crate::types::{ForecastSeries, WeatherError};

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: String,
}

impl ForecastProvider {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the service's default multi-day window for a coordinate pair.
    #[instrument(skip(self, cancel), level = "info")]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
        cancel: &CancellationToken,
    ) -> Result<ForecastSeries, WeatherError> {
        let request = self.client.get(&self.base_url).query(&[
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("timezone", timezone.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
        ]);

        let body: ForecastResponse = get_json(request, cancel).await?;
        let daily = body.daily;
        let series = ForecastSeries::new(
            daily.time,
            daily.weathercode,
            daily.temperature_2m_max,
            daily.temperature_2m_min,
        )?;

        tracing::info!("Fetched {} forecast days", series.len());
        Ok(series)
    }
}
