use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{Config, FetchError, LocationQuery, WeatherReading};

use super::WeatherProvider;

/// Value of `cod` on a successful response.
const SUCCESS_CODE: u16 = 200;

/// Client for the OpenWeather "current weather" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_owned();

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

/// OpenWeather sends `cod` as a number on success and as a string on most errors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(u16),
    Text(String),
}

impl OwCode {
    fn as_u16(&self) -> Option<u16> {
        match self {
            OwCode::Number(n) => Some(*n),
            OwCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwEnvelope {
    cod: Option<OwCode>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    clouds: OwClouds,
    wind: OwWind,
    sys: OwSys,
    weather: Vec<OwWeather>,
    #[serde(default)]
    timezone: Option<i32>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (description, icon) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("unknown".to_string(), String::new()));

        WeatherReading {
            location_name: parsed.name,
            temperature_k: parsed.main.temp,
            feels_like_k: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            cloudiness_pct: parsed.clouds.all,
            wind_speed_mps: parsed.wind.speed,
            wind_direction_deg: parsed.wind.deg,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            description,
            icon,
            utc_offset_secs: parsed.timezone,
        }
    }
}

/// Interpret a response body. The `cod` field decides success, not the HTTP status.
fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let envelope: OwEnvelope = serde_json::from_str(body).map_err(|e| {
        FetchError::failed(format!("upstream returned a non-JSON body ({e}): {}", truncate_body(body)))
    })?;

    let code = envelope
        .cod
        .as_ref()
        .ok_or_else(|| FetchError::failed("upstream response has no `cod` field"))?;
    let code = code
        .as_u16()
        .ok_or_else(|| FetchError::failed(format!("upstream `cod` is not numeric: {code:?}")))?;

    if code != SUCCESS_CODE {
        return Err(FetchError::UpstreamRejected {
            code,
            message: envelope.message.unwrap_or_else(|| "no message".to_string()),
        });
    }

    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::failed(format!("invalid payload: {e}")))?;

    WeatherReading::from(parsed).validate()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        "openweather"
    }

    #[instrument(skip_all, fields(location = %location))]
    async fn current(&self, location: &LocationQuery) -> Result<WeatherReading, FetchError> {
        let res = self
            .http
            .get(self.weather_url())
            .query(&[("q", location.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        parse_current(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
