//! Chat and health endpoint handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use super::types::{ChatRequest, ChatResponse, HealthResponse};
use super::AppState;

/// POST /chat - run one chat flow to completion.
///
/// Logical failures (the query was not a weather question) are 200s with
/// `status: "failure"`; only internal faults surface as 500.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, thread_id = %request.thread_id, "chat request");

    let reply = state
        .agent
        .run_chat(&request.user_input, &request.thread_id)
        .await
        .map_err(|e| {
            tracing::error!(%request_id, thread_id = %request.thread_id, error = %e, "chat flow failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "response": e.to_string() })),
            )
        })?;

    Ok(Json(ChatResponse::from_reply(reply)))
}

/// GET /health - service liveness.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
