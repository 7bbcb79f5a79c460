//! Weather lookups for Classy
//!
//! Resolves place names and fetches daily forecasts from the Open-Meteo
//! APIs, and turns the results into display-ready day cards.

pub mod client;
pub mod format;
pub mod geocode;
pub mod icons;
pub mod provider;
mod request;
pub mod types;

pub use client::WeatherClient;
pub use format::{day_cards, format_day, DayCard};
pub use geocode::{country_flag, GeocodingClient};
pub use icons::{weather_icon, NOT_FOUND};
pub use provider::ForecastProvider;
pub use types::*;
