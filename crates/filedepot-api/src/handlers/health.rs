use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Liveness check. Reports the active storage backend so operators can tell
/// at a glance which backend a deployment ended up with.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "backend": state.storage.backend_type(),
    }))
}
