use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use assistant::ChatOutcome;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single user question; there is no conversation history
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "super::text_field")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Forward a question to the chat assistant
///
/// - no client configured: 500 with a fixed message
/// - service failure: 200 with a fixed apology, error logged
/// - success: 200 with the model's text
pub async fn chat(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<ChatResponse>)> {
    if !state.assistant.is_ready() {
        return Ok(respond(&ChatOutcome::Unavailable));
    }

    let Json(request) = payload.map_err(ServerError::from)?;
    let message = request.message.unwrap_or_default();
    let outcome = state.assistant.reply(&message).await;
    Ok(respond(&outcome))
}

fn respond(outcome: &ChatOutcome) -> (StatusCode, Json<ChatResponse>) {
    let status = match outcome {
        ChatOutcome::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        ChatOutcome::Degraded(_) | ChatOutcome::Answered(_) => StatusCode::OK,
    };
    (
        status,
        Json(ChatResponse {
            response: outcome.user_text().to_string(),
        }),
    )
}
