//! Weather backend: async place resolution and forecast fetching.
//! Network work runs on the tokio runtime; results are sent back over mpsc.

use std::sync::Arc;

use classy_core::AppError;
use classy_weather::{ForecastSeries, ResolvedPlace, WeatherClient, WeatherError};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error_mapping::LookupErrorExt;
use crate::model::FetchRequest;

/// Messages sent from a lookup task back to the UI loop.
/// Each carries the generation of the query that started it.
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Geocoding finished; the header can update before the forecast lands.
    PlaceResolved {
        generation: u64,
        place: ResolvedPlace,
    },
    ForecastReady {
        generation: u64,
        forecast: ForecastSeries,
    },
    /// Any failure except cancellation.
    Failed { generation: u64, error: AppError },
}

impl WeatherServiceMessage {
    pub fn generation(&self) -> u64 {
        match self {
            Self::PlaceResolved { generation, .. }
            | Self::ForecastReady { generation, .. }
            | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Start the resolve-then-forecast sequence for `request`.
///
/// Nothing is sent once `cancel` fires: the token is checked after each
/// network call, before its result is published. Cancellation is never
/// reported as a failure.
pub fn request_fetch(
    tx: &UnboundedSender<WeatherServiceMessage>,
    client: Arc<WeatherClient>,
    request: FetchRequest,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let tx = tx.clone();

    tokio::spawn(async move {
        let generation = request.generation;
        match lookup(&tx, &client, &request, &cancel).await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() || cancel.is_cancelled() => {
                tracing::debug!("Lookup for {:?} cancelled", request.query);
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!("No place matches {:?}", request.query);
                } else {
                    tracing::error!("Weather lookup for {:?} failed: {}", request.query, e);
                }
                let _ = tx.send(WeatherServiceMessage::Failed {
                    generation,
                    error: e.into_app_error(),
                });
            }
        }
    })
}

async fn lookup(
    tx: &UnboundedSender<WeatherServiceMessage>,
    client: &WeatherClient,
    request: &FetchRequest,
    cancel: &CancellationToken,
) -> Result<(), WeatherError> {
    let place = client.resolve(&request.query, cancel).await?;
    if cancel.is_cancelled() {
        return Err(WeatherError::Cancelled);
    }
    let _ = tx.send(WeatherServiceMessage::PlaceResolved {
        generation: request.generation,
        place: place.clone(),
    });

    let forecast = client.forecast(&place, cancel).await?;
    if cancel.is_cancelled() {
        return Err(WeatherError::Cancelled);
    }
    let _ = tx.send(WeatherServiceMessage::ForecastReady {
        generation: request.generation,
        forecast,
    });

    Ok(())
}
