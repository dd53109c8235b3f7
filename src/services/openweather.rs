//! OpenWeatherMap "current weather" client.
//!
//! See: https://openweathermap.org/current

use std::fmt;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::WeatherPayload;

/// Client for the OpenWeatherMap current-weather endpoint.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch current conditions for a city name, in metric units.
    ///
    /// Any non-200 status, transport failure, timeout or unparseable body is
    /// reported as `AppError::ExternalServiceError`. The request URL carries
    /// the API key, so it is stripped from every error message.
    pub async fn fetch_current(&self, location: &str) -> Result<WeatherPayload, AppError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "OpenWeather request failed: {}",
                    e.without_url()
                ))
            })?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(AppError::ExternalServiceError(format!(
                "OpenWeather returned HTTP {}",
                response.status()
            )));
        }

        response.json::<WeatherPayload>().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "OpenWeather JSON parse error: {}",
                e.without_url()
            ))
        })
    }
}
