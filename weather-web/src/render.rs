//! HTML page and terminal output for a [`ViewState`].

use tera::{Context, Tera};
use weather_core::{Theme, ViewModel, ViewState};

use crate::error::ApiError;

const INDEX: &str = "index.html";

/// Compiled page template. Built once at startup and shared.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { tera })
    }

    pub fn page(&self, state: &ViewState) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("location", state.location().map_or("", |l| l.as_str()));
        ctx.insert("searching", &state.is_fetching());

        let theme = match state.view_model() {
            Some(view) => {
                let theme = view.theme;
                ctx.insert("view", &view);
                theme
            }
            None => Theme::Cold,
        };
        ctx.insert("theme", theme.as_str());
        ctx.insert("background", theme.gradient());

        if let Some(err) = state.error() {
            ctx.insert("error", &ApiError::from(err.clone()).public_message());
        }

        self.tera.render(INDEX, &ctx)
    }
}

/// Plain-text rendering for the `show` command.
pub fn text(view: &ViewModel) -> String {
    let mut out = format!(
        "{}  {}°C (feels like {}°C)  {}\n{}\n",
        view.location_name, view.temperature_c, view.feels_like_c, view.description, view.date,
    );

    let width = view.details.iter().map(|d| d.label.len()).max().unwrap_or(0);
    for row in &view.details {
        out.push_str(&format!("  {:<width$}  {}\n", row.label, row.value));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weather_core::{FetchError, LocationQuery, WeatherReading};

    fn reading() -> WeatherReading {
        WeatherReading {
            location_name: "Paris".to_string(),
            temperature_k: 290.15,
            feels_like_k: 289.0,
            humidity_pct: 60,
            cloudiness_pct: 20,
            wind_speed_mps: 5.0,
            wind_direction_deg: 180.0,
            sunrise: 1_700_000_000,
            sunset: 1_700_040_000,
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
            utc_offset_secs: None,
        }
    }

    fn finished(result: Result<WeatherReading, FetchError>) -> ViewState {
        let location = LocationQuery::new("Paris");
        let mut state = ViewState::default();
        state.begin(location.clone());
        state.complete(&location, result, Utc::now());
        state
    }

    #[test]
    fn ready_page_shows_temperature_and_rows() {
        let html = Renderer::new().unwrap().page(&finished(Ok(reading()))).unwrap();
        assert!(html.contains("17°C"));
        assert!(html.contains("Feels like 16°C"));
        assert!(html.contains("data-theme=\"warm\""));
        assert!(html.contains("Wind Direction"));
        assert!(html.contains("01d@2x.png"));
    }

    #[test]
    fn searching_page_has_no_numbers() {
        let mut state = ViewState::default();
        state.begin(LocationQuery::new("Oslo"));

        let html = Renderer::new().unwrap().page(&state).unwrap();
        assert!(html.contains("Searching Oslo"));
        assert!(!html.contains("Weather Details"));
    }

    #[test]
    fn failed_page_shows_public_message() {
        let err = FetchError::UpstreamRejected { code: 404, message: "city not found".into() };
        let html = Renderer::new().unwrap().page(&finished(Err(err))).unwrap();
        assert!(html.contains("Location not found: city not found"));
        assert!(!html.contains("Weather Details"));
    }

    #[test]
    fn location_is_escaped() {
        let mut state = ViewState::default();
        state.begin(LocationQuery::new("<script>"));

        let html = Renderer::new().unwrap().page(&state).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn text_lists_rows_in_order() {
        let view = ViewModel::build(&reading(), Utc::now());
        let out = text(&view);
        let humidity = out.find("Humidity").unwrap();
        let sunset = out.find("Sunset").unwrap();
        assert!(out.starts_with("Paris  17°C"));
        assert!(humidity < sunset);
        assert!(out.contains("60%"));
    }
}
