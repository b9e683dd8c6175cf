//! Health check route.
//!
//! Reports whether the files directory can be listed.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: HealthCheck,
    pub checked_at: String,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match state.store.list().await {
        Ok(names) => HealthCheck {
            status: "ready",
            detail: format!("{} documents in {}", names.len(), state.store.root().display()),
        },
        Err(error) => {
            warn!(%error, "Storage health check failed");
            HealthCheck {
                status: "degraded",
                detail: error.to_string(),
            }
        }
    };

    let ready = storage.status == "ready";
    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        storage,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(payload))
}
