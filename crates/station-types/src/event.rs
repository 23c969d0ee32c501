//! Event types for the Station notification hub.
//!
//! `StationEvent` is the unified event type fanned out to WebSocket
//! subscribers. The hub itself is event-type-agnostic: anything serializable
//! rides the same channel. Wire format is internally tagged, so an
//! `AgentStatusChanged` frame looks like
//! `{"type":"agent_status_changed","agent":{...}}`.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::chat::ChatMessage;

/// Events delivered to hub subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StationEvent {
    /// An agent's liveness status flipped. Emitted only on actual
    /// transitions, never on repeated observations of the same status.
    AgentStatusChanged { agent: Agent },

    /// A chat message was posted.
    ChatMessage(ChatMessage),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentStatus;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_status_changed_wire_shape() {
        let event = StationEvent::AgentStatusChanged {
            agent: Agent::new("a1", "Worker1", "http://localhost:9001"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "agent_status_changed");
        assert_eq!(json["agent"]["id"], "a1");
        assert_eq!(json["agent"]["status"], "inactive");
    }

    #[test]
    fn test_chat_message_wire_shape() {
        let event = StationEvent::ChatMessage(ChatMessage {
            id: Uuid::now_v7(),
            sid: "lobby".to_string(),
            sender: "alice".to_string(),
            message: "hello".to_string(),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "chat_message");
        // Chat fields sit at the top level of the frame, not nested.
        assert_eq!(json["sid"], "lobby");
        assert_eq!(json["sender"], "alice");
    }

    #[test]
    fn test_event_deserialize_by_tag() {
        let json = r#"{"type":"agent_status_changed","agent":{"id":"a1","name":"W","endpoint":"http://x","status":"active","last_seen_at":null}}"#;
        let event: StationEvent = serde_json::from_str(json).unwrap();
        match event {
            StationEvent::AgentStatusChanged { agent } => {
                assert_eq!(agent.status, AgentStatus::Active);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
