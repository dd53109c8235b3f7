//! The dashboard page.
//!
//! A single static page; it calls `/api/v1/report` and renders the returned
//! figures with plotly.js.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_wires_report_endpoint() {
        let Html(page) = index().await;
        assert!(page.contains("/api/v1/report"));
        assert!(page.contains("/api/v1/examples"));
        assert!(page.contains("Get Weather"));
    }

    #[tokio::test]
    async fn test_index_reports_failed_requests() {
        let Html(page) = index().await;
        assert!(page.contains("catch (err)"));
        assert!(page.contains("Could not load the weather report"));
    }
}
