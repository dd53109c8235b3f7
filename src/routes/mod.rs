use axum::{routing::get, Router};

use crate::services::weather::WeatherSource;

pub mod dashboard;
pub mod health;
pub mod reports;

/// Shared application state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) weather: WeatherSource,
}

/// All application routes, without middleware.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/examples", get(reports::list_examples))
        .route("/api/v1/report", get(reports::get_report))
        .with_state(state)
}
