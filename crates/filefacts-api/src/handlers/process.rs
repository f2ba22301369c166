use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use filefacts_core::models::TaskRequest;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAccepted {
    pub accepted: bool,
    pub task_id: String,
}

/// Accept a task and run it in the background.
///
/// Responds before processing starts; the outcome goes to the task's callback URL.
#[tracing::instrument(skip(state, request), fields(task_id = %request.task_id))]
pub async fn process_task(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TaskRequest>,
) -> Result<(StatusCode, Json<ProcessAccepted>), HttpAppError> {
    request.validate()?;

    let task_id = request.task_id.clone();
    // Detached; the spawned task reports its own outcome.
    drop(state.dispatcher.dispatch(request));

    Ok((
        StatusCode::ACCEPTED,
        Json(ProcessAccepted {
            accepted: true,
            task_id,
        }),
    ))
}
