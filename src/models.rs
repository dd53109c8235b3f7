//! Weather data types: the provider payload and the per-request report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- OpenWeatherMap "current weather" JSON ---

/// Body of `GET /weather` from OpenWeatherMap, limited to the fields the
/// dashboard reads. Sample data is generated in the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub name: String,
    #[serde(default)]
    pub sys: Sys,
    /// Observation time, unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub coord: Option<Coord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl WeatherPayload {
    /// Description of the first reported condition, or "unknown".
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown")
    }
}

// --- Report ---

/// Where the numbers in a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Retrieved from the weather provider
    Live,
    /// Generated locally because the provider could not be reached
    Sample,
}

impl Source {
    /// Label shown in the summary card.
    pub fn label(&self) -> &'static str {
        match self {
            Source::Live => "🌐 Live",
            Source::Sample => "🧪 Sample",
        }
    }
}

/// Current conditions for one location, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherReport {
    /// City name as returned by the provider (title-cased input for sample data)
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Feels-like temperature in Celsius
    pub feels_like_c: f64,
    /// Relative humidity percentage
    pub humidity_pct: u8,
    /// Sea-level pressure in hPa
    pub pressure_hpa: f64,
    /// Wind speed in metres per second
    pub wind_speed_mps: f64,
    /// Title-cased condition description (e.g. "Light Rain")
    pub description: String,
    /// Emoji glyph for the condition
    pub icon: String,
    /// Observation time (ISO 8601), when the provider supplied one
    pub observed_at: Option<DateTime<Utc>>,
    /// Data provenance
    pub source: Source,
}
