use crate::state::AppState;
use axum::{extract::State, Json};
use filefacts_core::models::Manifest;
use std::sync::Arc;

pub async fn get_manifest(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    Json(state.manifest.clone())
}
