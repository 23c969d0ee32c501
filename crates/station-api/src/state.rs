//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the HTTP layer,
//! the CLI, and the liveness monitor. Core services are generic over store
//! traits, but AppState pins them to the concrete infra implementations.
//! Everything is constructed once at process start and shared by handle --
//! no ambient global lookup anywhere.

use std::sync::Arc;

use station_core::chat::ChatService;
use station_core::hub::NotificationHub;
use station_infra::chatlog::JsonlChatLog;
use station_infra::jsonfile::JsonFileAgentStore;
use station_types::config::StationConfig;

/// Concrete type alias for the chat service pinned to the JSONL log.
pub type ConcreteChatService = ChatService<JsonlChatLog>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonFileAgentStore>,
    pub hub: Arc<NotificationHub>,
    pub chat_service: Arc<ConcreteChatService>,
    pub config: StationConfig,
}

impl AppState {
    /// Initialize the application state: open stores, wire services.
    pub async fn init(config: StationConfig) -> anyhow::Result<Self> {
        let store = Arc::new(JsonFileAgentStore::open(&config.data_file).await?);
        let hub = Arc::new(NotificationHub::new());

        let chat_log = JsonlChatLog::open(&config.chat_log_file).await?;
        let chat_service = Arc::new(ChatService::new(chat_log, hub.clone()));

        Ok(Self {
            store,
            hub,
            chat_service,
            config,
        })
    }
}
