//! Cancellable JSON GET shared by the geocoding and forecast clients.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::types::WeatherError;

/// Send `request` and decode its JSON body, unless `cancel` fires first.
///
/// A cancelled request is dropped mid-flight, which aborts the connection.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<T, WeatherError> {
    if cancel.is_cancelled() {
        return Err(WeatherError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(WeatherError::Cancelled),
        result = send(request) => result,
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, WeatherError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(WeatherError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
}
