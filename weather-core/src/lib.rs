//! Core library for the weather lookup view.
//!
//! This crate defines:
//! - Configuration (API key, endpoint, timeout)
//! - Location resolution and the upstream provider abstraction
//! - The view model built from a reading, and the state that selects it
//!
//! It is used by `weather-web`, but has no dependency on any web framework.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use model::{DEFAULT_LOCATION, LocationQuery, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use service::WeatherService;
pub use state::ViewState;
pub use view::{DetailRow, Theme, ViewModel, kelvin_to_celsius};
