//! Sample weather data used when the provider cannot be reached.
//!
//! Values are drawn from a shared random source that can be seeded, so a
//! deployment (or a test) can pin the generated numbers.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::helpers::{round_1dp, title_case};
use crate::models::{Clouds, Condition, Coord, MainReadings, Sys, WeatherPayload, Wind};

/// Inclusive range for generated temperatures (°C).
pub const SAMPLE_TEMPERATURE_RANGE: (f64, f64) = (10.0, 30.0);
/// Inclusive range for the feels-like offset from the temperature (°C).
pub const SAMPLE_FEELS_LIKE_OFFSET: (f64, f64) = (-2.0, 3.0);
/// Inclusive range for generated relative humidity (%).
pub const SAMPLE_HUMIDITY_RANGE: (u8, u8) = (40, 80);
/// Inclusive range for generated wind speeds (m/s).
pub const SAMPLE_WIND_RANGE: (f64, f64) = (1.0, 8.0);

/// Fixed parts of every sample payload.
fn template(now: DateTime<Utc>) -> WeatherPayload {
    WeatherPayload {
        name: "Sample City".to_string(),
        sys: Sys {
            country: "US".to_string(),
        },
        dt: Some(now.timestamp()),
        main: MainReadings {
            temp: 22.0,
            feels_like: 24.0,
            humidity: 65,
            pressure: 1013.0,
        },
        wind: Wind {
            speed: 3.5,
            deg: Some(180.0),
        },
        clouds: Some(Clouds { all: 40 }),
        weather: vec![Condition {
            description: "scattered clouds".to_string(),
        }],
        coord: Some(Coord {
            lat: 40.7128,
            lon: -74.0060,
        }),
    }
}

/// Build a sample payload for `location` from the template and fresh draws.
pub fn generate_sample<R: Rng>(
    location: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> WeatherPayload {
    let mut payload = template(now);
    payload.name = title_case(location.trim());

    let temp = round_1dp(rng.random_range(SAMPLE_TEMPERATURE_RANGE.0..=SAMPLE_TEMPERATURE_RANGE.1));
    let offset = rng.random_range(SAMPLE_FEELS_LIKE_OFFSET.0..=SAMPLE_FEELS_LIKE_OFFSET.1);
    payload.main.temp = temp;
    payload.main.feels_like = round_1dp(temp + offset);
    payload.main.humidity = rng.random_range(SAMPLE_HUMIDITY_RANGE.0..=SAMPLE_HUMIDITY_RANGE.1);
    payload.wind.speed = round_1dp(rng.random_range(SAMPLE_WIND_RANGE.0..=SAMPLE_WIND_RANGE.1));

    payload
}

/// Shared, optionally seeded random source for sample data and chart filler.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    rng: Arc<Mutex<StdRng>>,
}

impl SampleGenerator {
    /// Random source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic random source.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Run `f` with exclusive access to the random source.
    ///
    /// The lock is released when `f` returns; never call this across an await.
    pub fn draw<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *rng)
    }

    pub fn sample_payload(&self, location: &str) -> WeatherPayload {
        self.draw(|rng| generate_sample(location, rng, Utc::now()))
    }
}
