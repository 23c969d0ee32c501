//! Chat message service.
//!
//! Chat is a second publisher into the notification hub: a posted message is
//! appended to the durable log first, then broadcast. Delivery to live
//! subscribers is fire-and-forget relative to the log -- a subscriber that
//! receives the event is guaranteed the message was durably appended, but
//! nothing re-synchronizes history readers with the live stream.

use std::sync::Arc;

use chrono::Utc;
use station_types::chat::{ChatMessage, ChatMessageRequest};
use station_types::error::{AgentError, ChatLogError};
use station_types::event::StationEvent;
use uuid::Uuid;

use crate::hub::NotificationHub;
use crate::repository::chat::ChatLogStore;

/// Errors from posting a chat message.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Invalid(#[from] AgentError),

    #[error(transparent)]
    Log(#[from] ChatLogError),
}

/// Service appending chat messages and publishing them through the hub.
pub struct ChatService<L: ChatLogStore> {
    log: L,
    hub: Arc<NotificationHub>,
}

impl<L: ChatLogStore> ChatService<L> {
    pub fn new(log: L, hub: Arc<NotificationHub>) -> Self {
        Self { log, hub }
    }

    /// Validate, persist, and broadcast one chat message.
    pub async fn post_message(&self, request: ChatMessageRequest) -> Result<ChatMessage, ChatError> {
        request.validate()?;

        let message = ChatMessage {
            id: Uuid::now_v7(),
            sid: request.sid,
            sender: request.sender,
            message: request.message,
            timestamp: Utc::now(),
        };

        self.log.append(&message).await?;
        self.hub
            .broadcast(StationEvent::ChatMessage(message.clone()))
            .await;

        Ok(message)
    }

    /// Recent history for a session, oldest first.
    pub async fn history(&self, sid: &str, limit: usize) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.log.recent(sid, limit).await?)
    }
}
