//! Health check handler and response type.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub backend: String,
    pub configured: bool,
    pub version: &'static str,
}

/// Liveness plus the active access backend.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let configured = state.orchestrator_settings.read().await.is_some();

    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            backend: state.backend().to_string(),
            configured,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
