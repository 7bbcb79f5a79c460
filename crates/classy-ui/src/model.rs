//! Presentation model: current query, request state and the data on screen.
//!
//! The model never talks to the network. Query changes hand back a
//! [`FetchRequest`] for the caller to run, and results come back through
//! [`WeatherModel::apply`]. Every query change bumps the generation, so
//! results tagged with an older generation are dropped no matter when
//! they arrive.

use classy_core::AppError;
use classy_weather::{day_cards, DayCard, ForecastSeries};

use crate::services::WeatherServiceMessage;
use crate::state::RequestState;

/// A lookup the caller should start for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct WeatherModel {
    query: String,
    min_query_len: usize,
    state: RequestState,
    generation: u64,
    header: Option<String>,
    forecast: Option<ForecastSeries>,
    last_error: Option<AppError>,
}

impl WeatherModel {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            min_query_len,
            state: RequestState::Idle,
            generation: 0,
            header: None,
            forecast: None,
            last_error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Most recent non-cancellation failure, kept for diagnostics only.
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    fn is_searchable(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_len
    }

    /// Replace the query. Returns `None` when the query is unchanged or too
    /// short to search; fetched data is left untouched either way.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<FetchRequest> {
        let query = query.into();
        if query == self.query {
            return None;
        }

        self.generation += 1;
        let searchable = self.is_searchable(&query);
        self.state = self.state.on_query_change(searchable);
        self.query = query;

        if !searchable {
            tracing::debug!("Query {:?} too short, not searching", self.query);
            return None;
        }

        Some(FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Request for the current query, used once at startup for a restored query.
    pub fn initial_request(&mut self) -> Option<FetchRequest> {
        if !self.is_searchable(&self.query) {
            return None;
        }
        self.state = RequestState::Loading;
        Some(FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Set the query restored from storage without starting a lookup.
    pub fn restore_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Apply a service result. Returns false when the message belongs to a
    /// superseded query and was ignored.
    pub fn apply(&mut self, message: WeatherServiceMessage) -> bool {
        if message.generation() != self.generation {
            tracing::debug!(
                "Dropping stale result for generation {} (current {})",
                message.generation(),
                self.generation
            );
            return false;
        }

        match message {
            WeatherServiceMessage::PlaceResolved { place, .. } => {
                self.header = Some(place.display_name());
            }
            WeatherServiceMessage::ForecastReady { forecast, .. } => {
                self.forecast = Some(forecast);
                self.last_error = None;
                self.state = self.state.on_forecast_ready();
            }
            WeatherServiceMessage::Failed { error, .. } => {
                tracing::debug!("Lookup failed: {}", error.user_message());
                self.last_error = Some(error);
                self.state = self.state.on_failure();
            }
        }
        true
    }

    /// Header and day cards to draw, if any. Idle shows nothing; every
    /// other state shows the last fetched forecast, stale or not.
    pub fn visible_forecast(&self) -> Option<(&str, Vec<DayCard>)> {
        if !self.state.shows_forecast() {
            return None;
        }
        let forecast = self.forecast.as_ref()?;
        let header = self.header.as_deref().unwrap_or_default();
        Some((header, day_cards(forecast)))
    }
}
