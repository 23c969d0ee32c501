//! Chat log store trait definition.

use station_types::chat::ChatMessage;
use station_types::error::ChatLogError;

/// Store trait for the append-only chat message log.
///
/// Implementations live in station-infra (e.g., `JsonlChatLog`). Follows
/// the same RPITIT pattern as `AgentStore`.
pub trait ChatLogStore: Send + Sync {
    /// Append one message to the log.
    fn append(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), ChatLogError>> + Send;

    /// The most recent messages for a session, oldest first.
    ///
    /// An unreadable log degrades to an empty history.
    fn recent(
        &self,
        sid: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, ChatLogError>> + Send;
}
