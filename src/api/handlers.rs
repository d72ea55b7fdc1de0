//! HTTP API handlers.

use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlPool;
use tracing::error;

use crate::db;
use crate::error::DbError;
use crate::metrics;
use crate::reports::{self, AreaCount, CAMPAIGN_WINDOW, CURRENT_PERIOD_ID};
use crate::utils::now_iso8601;

/// Error category reported by the stats endpoint.
pub const STATS_ERROR_CATEGORY: &str = "Error al obtener datos";
/// Error category reported by the area breakdown endpoint.
pub const AREAS_ERROR_CATEGORY: &str = "Error al obtener datos por área";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// MySQL connection pool, constructed once at startup.
    pub pool: MySqlPool,
    /// Per-query execution bound.
    pub query_timeout: Duration,
}

impl AppState {
    /// Create new app state.
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

/// Enrollment and qualifying-payment totals.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Total mock-exam enrollment records.
    #[serde(rename = "totalInscritos")]
    pub total_inscritos: i64,
    /// Payments inside the qualification window.
    #[serde(rename = "totalPagados")]
    pub total_pagados: i64,
    /// When this response was generated (ISO-8601).
    pub timestamp: String,
}

/// Distinct enrolled students per area, ordered by area name.
#[derive(Debug, Serialize)]
pub struct AreaBreakdownResponse {
    /// One entry per area, ascending by name.
    pub areas: Vec<AreaCount>,
    /// When this response was generated (ISO-8601).
    pub timestamp: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "OK".
    pub status: &'static str,
    /// When this response was generated (ISO-8601).
    pub timestamp: String,
}

/// Error payload returned with HTTP 500.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error category.
    pub error: String,
    /// Underlying error detail.
    pub message: String,
}

/// A handler-boundary error: which endpoint category to report, and the
/// database error behind it.
#[derive(Debug)]
pub struct ApiError {
    category: &'static str,
    source: DbError,
}

impl ApiError {
    fn stats(source: DbError) -> Self {
        Self {
            category: STATS_ERROR_CATEGORY,
            source,
        }
    }

    fn areas(source: DbError) -> Self {
        Self {
            category: AREAS_ERROR_CATEGORY,
            source,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}: {}", self.category, self.source);

        let body = ErrorResponse {
            error: self.category.to_string(),
            message: self.source.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Stats handler - total enrollments plus qualifying payments.
///
/// Both counts run on the same pooled connection; the connection is
/// returned to the pool when the guard drops, on every exit path.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(|err| ApiError::stats(DbError::Connection(err)))?;

    let total_inscritos = db::run_query(
        "count_enrollments",
        state.query_timeout,
        reports::count_enrollments(&mut conn),
    )
    .await
    .map_err(ApiError::stats)?;

    let total_pagados = db::run_query(
        "count_qualifying_payments",
        state.query_timeout,
        reports::count_qualifying_payments(&mut conn, &CAMPAIGN_WINDOW),
    )
    .await
    .map_err(ApiError::stats)?;

    Ok(Json(StatsResponse {
        total_inscritos,
        total_pagados,
        timestamp: now_iso8601(),
    }))
}

/// Area breakdown handler - distinct enrolled students per area.
pub async fn area_breakdown(
    State(state): State<AppState>,
) -> Result<Json<AreaBreakdownResponse>, ApiError> {
    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(|err| ApiError::areas(DbError::Connection(err)))?;

    let areas = db::run_query(
        "enrollments_by_area",
        state.query_timeout,
        reports::enrollments_by_area(&mut conn, CURRENT_PERIOD_ID),
    )
    .await
    .map_err(ApiError::areas)?;

    Ok(Json(AreaBreakdownResponse {
        areas,
        timestamp: now_iso8601(),
    }))
}

/// Health check handler - always returns 200, never touches the database.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        timestamp: now_iso8601(),
    })
}

/// Metrics handler - Prometheus exposition text.
pub async fn metrics_text() -> String {
    metrics::render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stats_response_serializes_camel_case_totals() {
        let response = StatsResponse {
            total_inscritos: 120,
            total_pagados: 45,
            timestamp: "2025-12-01T00:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["totalInscritos"], 120);
        assert_eq!(value["totalPagados"], 45);
        assert_eq!(value["timestamp"], "2025-12-01T00:00:00.000Z");
    }

    #[test]
    fn area_breakdown_serializes_area_entries() {
        let response = AreaBreakdownResponse {
            areas: vec![AreaCount {
                area: "Biomédicas".to_string(),
                total_inscritos: 17,
            }],
            timestamp: "2025-12-01T00:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["areas"][0]["area"], "Biomédicas");
        assert_eq!(value["areas"][0]["total_inscritos"], 17);
    }

    #[test]
    fn health_response_reports_ok() {
        let value = serde_json::to_value(HealthResponse {
            status: "OK",
            timestamp: "2025-12-01T00:00:00.000Z".to_string(),
        })
        .unwrap();

        assert_eq!(value["status"], "OK");
    }

    #[test]
    fn error_response_round_trips() {
        let body = ErrorResponse {
            error: STATS_ERROR_CATEGORY.to_string(),
            message: "connection refused".to_string(),
        };

        let json = serde_json::to_string(&body).unwrap();
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error, STATS_ERROR_CATEGORY);
        assert_eq!(parsed.message, "connection refused");
    }
}
