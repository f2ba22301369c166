use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use filefacts_core::AppError;
use serde_json::{json, Value};
use std::sync::Arc;

/// Store orchestrator settings. The body must be a JSON object.
#[tracing::instrument(skip(state, body))]
pub async fn configure(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<Value>,
) -> Result<Json<Value>, HttpAppError> {
    let Value::Object(settings) = body else {
        return Err(AppError::InvalidInput("Configuration must be a JSON object".to_string()).into());
    };

    let keys = settings.len();
    *state.orchestrator_settings.write().await = Some(settings);

    tracing::info!(keys, "Orchestrator configuration received");

    Ok(Json(json!({
        "status": "configured",
        "keys": keys
    })))
}
