//! Presentation layer for Classy: request state, the presentation model,
//! the background lookup service and the terminal front end.

pub mod error_mapping;
pub mod keys;
pub mod model;
pub mod services;
pub mod state;
pub mod tui;

pub use keys::{KeyAction, KeySubscription, Keyboard};
pub use model::{FetchRequest, WeatherModel};
pub use services::WeatherServiceMessage;
pub use state::RequestState;
