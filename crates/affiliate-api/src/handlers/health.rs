//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use affiliate_service::HealthService;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub backend: &'static str,
}

/// Basic health check (liveness probe)
///
/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.config().app.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Readiness check with a database round trip
///
/// GET /api/health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let service = HealthService::new(state.service_context());
    let healthy = service.check_database().await.is_ok();

    let response = ReadinessResponse {
        status: if healthy { "ready" } else { "unavailable" },
        database: if healthy { "ok" } else { "error" },
        backend: service.backend(),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
