//! Health check endpoint
//!
//! `/health` is a constant liveness check. The relay holds no state or
//! dependencies, so there is nothing else to check.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
}

/// Liveness endpoint
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: HealthStatus::Ok,
        }),
    )
}
