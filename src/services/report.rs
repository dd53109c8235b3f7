//! Report assembly: fetch → extract → icon → HTML card → charts.

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::helpers::{escape_html, title_case};
use crate::models::{Source, WeatherPayload, WeatherReport};
use crate::services::charts::{humidity_gauge, temperature_chart, wind_gauge, Figure};
use crate::services::icons::icon_for;
use crate::services::weather::WeatherSource;

/// Everything the dashboard shows for one submission.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub html: String,
    pub report: WeatherReport,
    pub temperature_chart: Figure,
    pub humidity_chart: Figure,
    pub wind_chart: Figure,
}

/// Pull the displayed fields out of a provider payload.
pub fn extract_report(payload: &WeatherPayload, source: Source) -> WeatherReport {
    let description = title_case(payload.description());
    let icon = icon_for(&description).to_string();

    WeatherReport {
        city: payload.name.clone(),
        country: payload.sys.country.clone(),
        temperature_c: payload.main.temp,
        feels_like_c: payload.main.feels_like,
        humidity_pct: payload.main.humidity,
        pressure_hpa: payload.main.pressure,
        wind_speed_mps: payload.wind.speed,
        description,
        icon,
        observed_at: payload
            .dt
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        source,
    }
}

/// Render the summary card.
pub fn render_card(report: &WeatherReport) -> String {
    format!(
        r#"<div class="weather-card">
    <div class="card-header">
        <div>
            <h2>{city}, {country}</h2>
            <p class="muted">Data: {source}</p>
        </div>
        <div class="card-icon">{icon}</div>
    </div>
    <div class="card-body">
        <div class="temperature">{temp}°C</div>
        <div class="muted">Feels like {feels_like}°C</div>
        <div class="muted">{description}</div>
    </div>
    <div class="weather-metrics">
        <div class="weather-metric"><span>💧 Humidity</span><span class="metric-value">{humidity}%</span></div>
        <div class="weather-metric"><span>💨 Wind Speed</span><span class="metric-value">{wind} m/s</span></div>
        <div class="weather-metric"><span>🌡️ Pressure</span><span class="metric-value">{pressure} hPa</span></div>
    </div>
</div>"#,
        city = escape_html(&report.city),
        country = escape_html(&report.country),
        source = report.source.label(),
        icon = report.icon,
        temp = report.temperature_c,
        feels_like = report.feels_like_c,
        description = escape_html(&report.description),
        humidity = report.humidity_pct,
        wind = report.wind_speed_mps,
        pressure = report.pressure_hpa,
    )
}

/// Build the full report for a location.
///
/// A blank location is rejected before any request is made.
pub async fn build_report(
    weather: &WeatherSource,
    location: &str,
) -> Result<ReportBundle, AppError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::BadRequest("Please enter a city name".to_string()));
    }

    let fetched = weather.fetch(location).await?;
    let report = extract_report(&fetched.payload, fetched.source);
    let html = render_card(&report);

    let temperature_chart = weather
        .sampler()
        .draw(|rng| temperature_chart(None, rng));
    let humidity_chart = humidity_gauge(f64::from(report.humidity_pct));
    let wind_chart = wind_gauge(report.wind_speed_mps);

    tracing::info!(
        "Report for '{}': {} {}°C ({:?})",
        location,
        report.city,
        report.temperature_c,
        report.source
    );

    Ok(ReportBundle {
        html,
        report,
        temperature_chart,
        humidity_chart,
        wind_chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::charts::Trace;
    use crate::services::openweather::OpenWeatherClient;
    use crate::services::sample::SampleGenerator;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn london_body() -> serde_json::Value {
        serde_json::json!({
            "name": "London",
            "sys": { "country": "GB" },
            "dt": 1760000000,
            "main": { "temp": 12.3, "feels_like": 11.8, "humidity": 81, "pressure": 1009 },
            "wind": { "speed": 4.6 },
            "weather": [{ "description": "light rain" }]
        })
    }

    fn source_for(base_url: &str, fallback: bool) -> WeatherSource {
        let client = OpenWeatherClient::new(base_url, "key", Duration::from_millis(300)).unwrap();
        WeatherSource::new(client, SampleGenerator::from_entropy(), fallback)
    }

    async fn live_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
            .mount(&server)
            .await;
        server
    }

    fn gauge_value(fig: &Figure) -> f64 {
        match &fig.data[0] {
            Trace::Indicator(t) => t.value,
            other => panic!("expected indicator trace, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_live_report() {
        let server = live_server().await;
        let source = source_for(&server.uri(), true);

        let bundle = build_report(&source, "London").await.unwrap();
        assert_eq!(bundle.report.source, Source::Live);
        assert_eq!(bundle.report.description, "Light Rain");
        assert_eq!(bundle.report.icon, "🌧️");
        assert!(bundle.html.contains("London, GB"));
        assert!(bundle.html.contains("Live"));
        assert!(bundle.html.contains("12.3°C"));
        assert!(bundle.html.contains("Feels like 11.8°C"));
        assert!(bundle.html.contains("81%"));
        assert!(bundle.html.contains("4.6 m/s"));
        assert!(bundle.html.contains("1009 hPa"));
        assert_eq!(gauge_value(&bundle.humidity_chart), 81.0);
        assert_eq!(gauge_value(&bundle.wind_chart), 4.6);
    }

    #[tokio::test]
    async fn test_live_html_is_stable() {
        let server = live_server().await;
        let source = source_for(&server.uri(), true);

        let first = build_report(&source, "London").await.unwrap();
        let second = build_report(&source, "London").await.unwrap();
        assert_eq!(first.html, second.html);
    }

    #[tokio::test]
    async fn test_blank_location_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
            .expect(0)
            .mount(&server)
            .await;
        let source = source_for(&server.uri(), true);

        for input in ["", "   ", "\t\n"] {
            let err = build_report(&source, input).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("city name")));
        }
    }

    #[tokio::test]
    async fn test_sample_report_when_provider_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let source = source_for(&server.uri(), true);

        let bundle = build_report(&source, "new york").await.unwrap();
        let r = &bundle.report;
        assert_eq!(r.source, Source::Sample);
        assert_eq!(r.city, "New York");
        assert!(bundle.html.contains("New York, US"));
        assert!(bundle.html.contains("Sample"));
        assert!((10.0..=30.0).contains(&r.temperature_c));
        assert!((-2.05..=3.05).contains(&(r.feels_like_c - r.temperature_c)));
        assert!((40..=80).contains(&r.humidity_pct));
        assert!((1.0..=8.0).contains(&r.wind_speed_mps));
        assert_eq!(r.icon, "☁️");
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_without_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let source = source_for(&server.uri(), false);

        let err = build_report(&source, "London").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[test]
    fn test_card_escapes_markup() {
        let mut payload = SampleGenerator::seeded(1).sample_payload("x");
        payload.name = "<script>alert(1)</script>".to_string();
        let html = render_card(&extract_report(&payload, Source::Sample));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_extract_report_observed_at() {
        let mut payload = SampleGenerator::seeded(1).sample_payload("x");
        payload.dt = Some(1760000000);
        let report = extract_report(&payload, Source::Live);
        assert_eq!(report.observed_at.map(|t| t.timestamp()), Some(1760000000));
    }
}
