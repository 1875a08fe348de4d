use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// City looked up when the request does not name one.
pub const DEFAULT_LOCATION: &str = "London";

/// City name as typed by the user. Passed to the provider verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Resolve the `location` request parameter, falling back to [`DEFAULT_LOCATION`]
    /// when it is missing or empty.
    pub fn resolve(param: Option<&str>) -> Self {
        match param {
            Some(location) if !location.is_empty() => Self::new(location),
            _ => Self::new(DEFAULT_LOCATION),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current conditions as reported by the provider. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub humidity_pct: u8,
    pub cloudiness_pct: u8,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub sunrise: i64,
    pub sunset: i64,
    pub description: String,
    pub icon: String,
    /// Shift from UTC in seconds for the reported city, if the provider sent one.
    pub utc_offset_secs: Option<i32>,
}

impl WeatherReading {
    /// Reject readings whose numbers cannot describe real weather.
    pub fn validate(self) -> Result<Self, FetchError> {
        let finite = [
            ("temperature", self.temperature_k),
            ("feels_like", self.feels_like_k),
            ("wind speed", self.wind_speed_mps),
            ("wind direction", self.wind_direction_deg),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FetchError::failed(format!("invalid payload: {field} is not a finite number")));
        }

        if self.temperature_k < 0.0 || self.feels_like_k < 0.0 {
            return Err(FetchError::failed("invalid payload: negative Kelvin temperature"));
        }

        Ok(self)
    }
}
