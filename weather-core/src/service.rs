use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{LocationQuery, ViewState, WeatherProvider};

/// Resolve the location, fetch it, and build the view. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Look up the raw `location` request parameter.
    pub async fn lookup(&self, location: Option<&str>) -> ViewState {
        self.lookup_at(location, Utc::now()).await
    }

    /// Same as [`lookup`](Self::lookup) with an explicit wall clock for the date line.
    pub async fn lookup_at(&self, location: Option<&str>, now: DateTime<Utc>) -> ViewState {
        let location = LocationQuery::resolve(location);

        let mut state = ViewState::default();
        state.begin(location.clone());

        debug!(provider = self.provider.name(), %location, "Fetching current weather");
        let result = self.provider.current(&location).await;
        if let Err(err) = &result {
            warn!(provider = self.provider.name(), %location, error = %err, "Weather lookup failed");
        }

        state.complete(&location, result, now);
        state
    }
}
