//! HTTP API route definitions.
//!
//! All responses, including static files and 404s, pass through the
//! cache-disabling and CORS layers.

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{area_breakdown, health, metrics_text, stats, AppState};

/// `Cache-Control` value forced onto every response.
pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, private";

/// Create the API router.
///
/// Requests that match no API route fall back to static file serving
/// rooted at `static_dir` (404 for missing files).
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        // Reporting endpoints
        .route("/api/stats", get(stats))
        .route("/api/inscritos-por-area", get(area_breakdown))
        // Health endpoint
        .route("/health", get(health))
        // Metrics endpoint
        .route("/metrics", get(metrics_text))
        // Dashboard assets
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .with_state(state)
}
