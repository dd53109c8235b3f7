use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Whether provider failures are replaced by sample data
    pub synthetic_fallback: bool,
}

/// Health check endpoint.
///
/// Does not contact the weather provider.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        synthetic_fallback: state.weather.allows_synthetic_fallback(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::openweather::OpenWeatherClient;
    use crate::services::sample::SampleGenerator;
    use crate::services::weather::WeatherSource;
    use std::time::Duration;

    #[tokio::test]
    async fn test_health_reports_fallback_setting() {
        let client =
            OpenWeatherClient::new("http://127.0.0.1:1", "key", Duration::from_secs(1)).unwrap();
        let state = AppState {
            weather: WeatherSource::new(client, SampleGenerator::seeded(0), false),
        };

        let Json(body) = health_check(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert!(!body.synthetic_fallback);
    }
}
