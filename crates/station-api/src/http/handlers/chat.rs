//! Chat message handlers.
//!
//! Chat rides the same notification hub as agent status events: posting a
//! message appends it to the durable log and broadcasts a `chat_message`
//! frame to every WebSocket subscriber.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use station_types::chat::{ChatMessage, ChatMessageRequest};

use crate::http::error::AppError;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQuery {
    pub sid: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// POST /chat/messages - Post a message: persist, then fan out.
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let message = state.chat_service.post_message(body).await?;
    Ok(Json(message))
}

/// GET /chat/messages?sid=... - Recent history for a session, oldest first.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<ChatHistoryQuery>,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    let messages = state
        .chat_service
        .history(&query.sid, query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await?;
    Ok(Json(ChatHistoryResponse { messages }))
}
