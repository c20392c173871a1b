//! AI assistant chat endpoint.

use axum::{Json, Router, extract::State, routing::post};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireSession,
    services::{ChatReply, ChatRequest, ChatService},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chat", post(send_message))
}

/// Send a message to the assistant.
///
/// # Errors
///
/// Returns 400 if the message is blank.
#[instrument(skip_all)]
pub async fn send_message(
    RequireSession(_user): RequireSession,
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".to_string()));
    }
    Ok(Json(
        ChatService::new(state.latency()).reply(&body.message).await,
    ))
}
