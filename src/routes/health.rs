//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub upstream: String,
    pub has_snapshot: bool,
}

/// Liveness probe - always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe - checks FoodieHub API reachability.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let upstream = match state.source.health_check().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Upstream health check failed");
            format!("error: {e}")
        }
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        upstream,
        has_snapshot: state.dashboard.current().is_some(),
    })
}
