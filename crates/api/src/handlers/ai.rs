//! Handler for the assistant chat proxy.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/ai/chat
///
/// Forwards `{message}` and the caller's token to the upstream service.
/// 400 on an empty message; 503 with the fallback text on any upstream
/// failure.
pub async fn chat(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = input
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest("Message requis".into()))?;

    let response = state
        .assistant
        .chat(message, &user.bearer)
        .await
        .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

    tracing::debug!(user_id = user.user_id, "Assistant answered");
    Ok(Json(ChatResponse { response }))
}
