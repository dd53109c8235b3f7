//! Weather data source: live provider data with an optional sample fallback.

use crate::errors::AppError;
use crate::models::{Source, WeatherPayload};
use crate::services::openweather::OpenWeatherClient;
use crate::services::sample::SampleGenerator;

/// A payload together with where it came from.
#[derive(Debug, Clone)]
pub struct FetchedWeather {
    pub payload: WeatherPayload,
    pub source: Source,
}

#[derive(Debug, Clone)]
pub struct WeatherSource {
    client: OpenWeatherClient,
    sampler: SampleGenerator,
    allow_synthetic_fallback: bool,
}

impl WeatherSource {
    pub fn new(
        client: OpenWeatherClient,
        sampler: SampleGenerator,
        allow_synthetic_fallback: bool,
    ) -> Self {
        Self {
            client,
            sampler,
            allow_synthetic_fallback,
        }
    }

    pub fn sampler(&self) -> &SampleGenerator {
        &self.sampler
    }

    pub fn allows_synthetic_fallback(&self) -> bool {
        self.allow_synthetic_fallback
    }

    /// Fetch current weather for `location`.
    ///
    /// One attempt only. When the provider fails and fallback is enabled the
    /// failure is logged and replaced by sample data; otherwise it is returned.
    pub async fn fetch(&self, location: &str) -> Result<FetchedWeather, AppError> {
        match self.client.fetch_current(location).await {
            Ok(payload) => {
                tracing::debug!("Live weather for '{}': {}", location, payload.name);
                Ok(FetchedWeather {
                    payload,
                    source: Source::Live,
                })
            }
            Err(e) if self.allow_synthetic_fallback => {
                tracing::warn!("Serving sample weather for '{}': {}", location, e);
                Ok(FetchedWeather {
                    payload: self.sampler.sample_payload(location),
                    source: Source::Sample,
                })
            }
            Err(e) => Err(e),
        }
    }
}
