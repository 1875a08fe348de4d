use std::sync::Arc;

use weather_core::WeatherService;

use crate::render::Renderer;

/// Shared, read-only handles for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: WeatherService,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(service: WeatherService) -> Result<Self, tera::Error> {
        Ok(Self { service, renderer: Arc::new(Renderer::new()?) })
    }
}
