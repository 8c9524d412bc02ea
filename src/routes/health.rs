use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

/// Lets the frontend show its demo-mode notice when no AI key is configured.
pub async fn service_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "ai_enabled": state.ai_enabled,
    }))
}
