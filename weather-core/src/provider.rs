use crate::{
    Config, FetchError, LocationQuery, WeatherReading, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current conditions for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn current(&self, location: &LocationQuery) -> Result<WeatherReading, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Arc::new(provider))
}
