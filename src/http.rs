use crate::health::Health;
use crate::result::{overall_status, CheckResult, HealthStatus};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub checks: Vec<CheckResult>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub healthy: usize,
    pub degraded: usize,
    pub unhealthy: usize,
}

impl HealthResponse {
    pub fn new(checks: Vec<CheckResult>) -> Self {
        let summary = Summary {
            total: checks.len(),
            healthy: checks
                .iter()
                .filter(|c| c.status == HealthStatus::Healthy)
                .count(),
            degraded: checks
                .iter()
                .filter(|c| c.status == HealthStatus::Degraded)
                .count(),
            unhealthy: checks
                .iter()
                .filter(|c| c.status == HealthStatus::Unhealthy)
                .count(),
        };

        Self {
            status: overall_status(&checks),
            timestamp: Utc::now(),
            checks,
            summary,
        }
    }

    pub fn http_status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            // Degraded still serves traffic.
            HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status = self.http_status_code();
        (status, Json(self)).into_response()
    }
}

/// Full dependency health: runs every registered check.
pub async fn health_handler(State(health): State<Arc<Health>>) -> impl IntoResponse {
    HealthResponse::new(health.run().await)
}

/// Readiness is the same evaluation as /health.
pub async fn readiness_handler(State(health): State<Arc<Health>>) -> impl IntoResponse {
    HealthResponse::new(health.run().await)
}

/// Liveness probes no dependencies: if we can answer, we are alive.
pub async fn liveness_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Router exposing `/health`, `/health/live` and `/health/ready`.
pub fn router(health: Arc<Health>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .with_state(health)
}
