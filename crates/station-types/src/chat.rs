//! Chat message types.
//!
//! The chat feature is a second publisher into the notification hub: messages
//! are appended to a log store and broadcast to live subscribers. `sid` is
//! the chat session identifier chosen by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AgentError;

/// A persisted chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sid: String,
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload accepted by `POST /chat/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub sid: String,
    pub sender: String,
    pub message: String,
}

impl ChatMessageRequest {
    pub fn validate(&self) -> Result<(), AgentError> {
        for (field, value) in [
            ("sid", &self.sid),
            ("sender", &self.sender),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(AgentError::InvalidName(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serde_roundtrip() {
        let msg = ChatMessage {
            id: Uuid::now_v7(),
            sid: "lobby".to_string(),
            sender: "alice".to_string(),
            message: "hello".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_request_validation() {
        let ok = ChatMessageRequest {
            sid: "lobby".to_string(),
            sender: "alice".to_string(),
            message: "hi".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank_sender = ChatMessageRequest {
            sender: "  ".to_string(),
            ..ok
        };
        assert!(blank_sender.validate().is_err());
    }
}
