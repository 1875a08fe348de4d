//! Display-ready representation of a [`WeatherReading`].

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;

use crate::WeatherReading;

const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - KELVIN_OFFSET).round() as i32
}

/// Background theme, chosen by temperature band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Cold,
    Mild,
    Warm,
    Hot,
}

impl Theme {
    /// `t <= 0` cold, `(0, 15]` mild, `(15, 25]` warm, above that hot.
    pub fn for_celsius(t: i32) -> Self {
        match t {
            i32::MIN..=0 => Theme::Cold,
            1..=15 => Theme::Mild,
            16..=25 => Theme::Warm,
            _ => Theme::Hot,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Cold => "cold",
            Theme::Mild => "mild",
            Theme::Warm => "warm",
            Theme::Hot => "hot",
        }
    }

    /// CSS background for the page.
    pub fn gradient(&self) -> &'static str {
        match self {
            Theme::Cold => "linear-gradient(135deg, #1e293b, #0f172a)",
            Theme::Mild => "linear-gradient(135deg, #065f46, #064e3b)",
            Theme::Warm => "linear-gradient(135deg, #0f766e, #115e59)",
            Theme::Hot => "linear-gradient(135deg, #d97706, #c2410c)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl DetailRow {
    fn new(icon: &'static str, label: &'static str, value: String) -> Self {
        Self { icon, label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub location_name: String,
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub description: String,
    pub icon: String,
    pub date: String,
    pub sunrise: String,
    pub sunset: String,
    pub theme: Theme,
    pub details: Vec<DetailRow>,
}

impl ViewModel {
    /// Build the view for `reading`. `now` only feeds the date line.
    pub fn build(reading: &WeatherReading, now: DateTime<Utc>) -> Self {
        let offset = reading
            .utc_offset_secs
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());

        let temperature_c = kelvin_to_celsius(reading.temperature_k);
        let sunrise = format_time(reading.sunrise, offset);
        let sunset = format_time(reading.sunset, offset);

        let details = vec![
            DetailRow::new("cloud-rain", "Cloudiness", format!("{}%", reading.cloudiness_pct)),
            DetailRow::new("droplet", "Humidity", format!("{}%", reading.humidity_pct)),
            DetailRow::new("wind", "Wind Speed", format!("{} m/s", reading.wind_speed_mps)),
            DetailRow::new("sunrise", "Sunrise", sunrise.clone()),
            DetailRow::new("sunset", "Sunset", sunset.clone()),
            DetailRow::new("compass", "Wind Direction", format!("{}°", reading.wind_direction_deg)),
        ];

        Self {
            location_name: reading.location_name.clone(),
            temperature_c,
            feels_like_c: kelvin_to_celsius(reading.feels_like_k),
            description: reading.description.clone(),
            icon: reading.icon.clone(),
            date: now.with_timezone(&offset).format("%A, %B %-d, %Y").to_string(),
            sunrise,
            sunset,
            theme: Theme::for_celsius(temperature_c),
            details,
        }
    }

    /// Shown while a lookup is in flight: no numbers from any previous city.
    pub fn placeholder(location_name: &str) -> Self {
        Self {
            location_name: location_name.to_string(),
            temperature_c: 0,
            feels_like_c: 0,
            description: String::new(),
            icon: String::new(),
            date: String::new(),
            sunrise: String::new(),
            sunset: String::new(),
            theme: Theme::for_celsius(0),
            details: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.details.is_empty()
    }
}

/// Unix seconds as `hh:mm AM`.
fn format_time(timestamp: i64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(&offset).format("%I:%M %p").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn celsius_conversion_rounds() {
        assert_eq!(kelvin_to_celsius(283.15), 10);
        assert_eq!(kelvin_to_celsius(273.15), 0);
        assert_eq!(kelvin_to_celsius(289.0), 16);
        assert_eq!(kelvin_to_celsius(0.0), -273);
    }

    #[test]
    fn theme_bands_have_no_gaps() {
        assert_eq!(Theme::for_celsius(-40), Theme::Cold);
        assert_eq!(Theme::for_celsius(0), Theme::Cold);
        assert_eq!(Theme::for_celsius(1), Theme::Mild);
        assert_eq!(Theme::for_celsius(15), Theme::Mild);
        assert_eq!(Theme::for_celsius(16), Theme::Warm);
        assert_eq!(Theme::for_celsius(25), Theme::Warm);
        assert_eq!(Theme::for_celsius(26), Theme::Hot);
        assert_eq!(Theme::for_celsius(i32::MAX), Theme::Hot);
    }

    #[test]
    fn builds_paris_view() {
        let view = ViewModel::build(&fixtures::paris(), noon());

        assert_eq!(view.location_name, "Paris");
        assert_eq!(view.temperature_c, 17);
        assert_eq!(view.feels_like_c, 16);
        assert_eq!(view.theme, Theme::Warm);
        assert_eq!(view.date, "Tuesday, March 5, 2024");
        assert_eq!(view.sunrise, "10:13 PM");
        assert_eq!(view.sunset, "09:20 AM");
    }

    #[test]
    fn detail_rows_are_in_fixed_order() {
        let view = ViewModel::build(&fixtures::paris(), noon());
        let labels: Vec<_> = view.details.iter().map(|d| d.label).collect();
        assert_eq!(
            labels,
            ["Cloudiness", "Humidity", "Wind Speed", "Sunrise", "Sunset", "Wind Direction"]
        );

        let values: Vec<_> = view.details.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, ["20%", "60%", "5 m/s", "10:13 PM", "09:20 AM", "180°"]);
    }

    #[test]
    fn city_offset_shifts_times_and_date() {
        let mut reading = fixtures::paris();
        reading.utc_offset_secs = Some(3600);
        let late = Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap();

        let view = ViewModel::build(&reading, late);
        assert_eq!(view.sunrise, "11:13 PM");
        assert_eq!(view.sunset, "10:20 AM");
        assert_eq!(view.date, "Wednesday, March 6, 2024");
    }

    #[test]
    fn placeholder_has_no_details() {
        let view = ViewModel::placeholder("Berlin");
        assert_eq!(view.temperature_c, 0);
        assert!(view.details.is_empty());
        assert!(view.is_placeholder());
        assert_eq!(view.location_name, "Berlin");
    }

    #[test]
    fn theme_serializes_lowercase() {
        let json = serde_json::to_value(ViewModel::build(&fixtures::paris(), noon())).unwrap();
        assert_eq!(json["theme"], "warm");
        assert_eq!(json["details"].as_array().map(Vec::len), Some(6));
    }
}
