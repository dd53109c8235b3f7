//! Report HTTP endpoints.
//!
//! - GET /api/v1/report?location=City
//! - GET /api/v1/examples

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::models::WeatherReport;
use crate::routes::AppState;
use crate::services::charts::Figure;
use crate::services::report::{build_report, ReportBundle};

/// Preset locations offered by the dashboard.
pub const EXAMPLE_LOCATIONS: [&str; 5] = ["London", "New York", "Tokyo", "Paris", "Sydney"];

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// City name (e.g. "London")
    #[serde(default)]
    pub location: String,
}

/// The three dashboard charts as plotly.js figures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCharts {
    /// Temperature line chart
    #[schema(value_type = Object)]
    pub temperature: Figure,
    /// Humidity gauge
    #[schema(value_type = Object)]
    pub humidity: Figure,
    /// Wind speed gauge
    #[schema(value_type = Object)]
    pub wind: Figure,
}

/// Weather report for one location.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponse {
    /// Summary card as an HTML fragment
    pub html: String,
    /// Structured values shown in the card
    pub report: WeatherReport,
    pub charts: ReportCharts,
}

impl From<ReportBundle> for ReportResponse {
    fn from(bundle: ReportBundle) -> Self {
        Self {
            html: bundle.html,
            report: bundle.report,
            charts: ReportCharts {
                temperature: bundle.temperature_chart,
                humidity: bundle.humidity_chart,
                wind: bundle.wind_chart,
            },
        }
    }
}

/// Get the weather report for a location.
///
/// Returns live data when the weather provider answers. Otherwise, if sample
/// fallback is enabled, returns generated data with `report.source = "sample"`.
#[utoipa::path(
    get,
    path = "/api/v1/report",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Weather report", body = ReportResponse),
        (status = 400, description = "Blank location", body = ErrorResponse),
        (status = 502, description = "Weather provider failed and fallback is disabled", body = ErrorResponse),
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, AppError> {
    let bundle = build_report(&state.weather, &params.location).await?;
    Ok(Json(bundle.into()))
}

/// List the preset example locations.
#[utoipa::path(
    get,
    path = "/api/v1/examples",
    tag = "Reports",
    responses(
        (status = 200, description = "Preset locations", body = [String]),
    )
)]
pub async fn list_examples() -> Json<Vec<&'static str>> {
    Json(EXAMPLE_LOCATIONS.to_vec())
}
