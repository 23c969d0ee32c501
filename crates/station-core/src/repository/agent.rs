//! Agent store trait definition.

use chrono::{DateTime, Utc};
use station_types::agent::{Agent, AgentStatus};
use station_types::error::RegistryError;

/// Store trait for the durable agent registry.
///
/// Implementations live in station-infra (e.g., `JsonFileAgentStore`) and
/// must hold a single exclusive lock across each full read-modify-write
/// cycle. Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait AgentStore: Send + Sync {
    /// Snapshot all registered agents.
    ///
    /// Unreadable or corrupt durable state degrades to an empty list; this
    /// never fails a caller because the backing file is missing.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Agent>, RegistryError>> + Send;

    /// Insert a new record or replace the record with a matching id.
    ///
    /// Idempotent. Re-registration replaces `name` and `endpoint` but keeps
    /// the stored `status` and `last_seen_at`: only `set_status` touches
    /// those. Returns the record as stored.
    fn upsert(
        &self,
        agent: Agent,
    ) -> impl std::future::Future<Output = Result<Agent, RegistryError>> + Send;

    /// Drive an agent's status from a probe observation.
    ///
    /// Returns `Ok(None)` when the id is unknown (a no-op, not an error) or
    /// when the stored status already equals `status` -- even if
    /// `observed_at` differs. This dedup is what keeps repeated probe
    /// results from flooding downstream subscribers. On an actual
    /// transition the record is updated, persisted, and returned.
    fn set_status(
        &self,
        id: &str,
        status: AgentStatus,
        observed_at: Option<DateTime<Utc>>,
    ) -> impl std::future::Future<Output = Result<Option<Agent>, RegistryError>> + Send;
}
