// Weather Dashboard v0.1
use std::net::SocketAddr;
use std::process::ExitCode;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod models;
mod routes;
mod services;

use config::{AppConfig, LogFormat};
use routes::AppState;
use services::openweather::OpenWeatherClient;
use services::sample::SampleGenerator;
use services::weather::WeatherSource;

/// Weather Dashboard — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Dashboard API",
        version = "0.1.0",
        description = "Current weather for any city, rendered as a summary card and three \
            charts. Data comes from OpenWeatherMap; when the provider cannot be reached \
            the service can substitute clearly labelled sample data.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Reports", description = "Weather reports and preset locations"),
    ),
    paths(
        routes::health::health_check,
        routes::reports::get_report,
        routes::reports::list_examples,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::reports::ReportResponse,
            routes::reports::ReportCharts,
            models::WeatherReport,
            models::Source,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "weather_dashboard=debug,tower_http=debug".into()),
    );
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn app(state: AppState) -> Router {
    // Read-only API: GET only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or(LogFormat::Text),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match OpenWeatherClient::new(
        &config.openweather_base_url,
        &config.openweather_api_key,
        config.http_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.sample_seed.is_some() {
        tracing::info!("Sample data uses a fixed seed");
    }
    if !config.allow_synthetic_fallback {
        tracing::info!("Sample fallback disabled; provider errors are returned to clients");
    }

    let state = AppState {
        weather: WeatherSource::new(
            client,
            SampleGenerator::from_seed_option(config.sample_seed),
            config.allow_synthetic_fallback,
        ),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Dashboard listening on http://localhost:{}", config.port);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!("Server terminated unexpectedly: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
