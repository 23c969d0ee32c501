//! JSON-file agent registry implementation.
//!
//! The whole registry is one JSON document (`{"agents": [...]}`) replaced
//! wholesale on every mutation. A single process-wide mutex is held across
//! each full read-modify-write cycle -- correctness over throughput, since
//! agent counts are small.
//!
//! Persistence is crash-atomic: the new state is serialized to a sibling
//! `.tmp` file and renamed over the durable path, so a crash mid-write
//! leaves the prior state intact and a reader can never observe a partial
//! record.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use station_core::repository::agent::AgentStore;
use station_types::agent::{Agent, AgentStatus};
use station_types::error::RegistryError;
use tokio::sync::Mutex;

/// Durable file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    agents: Vec<Agent>,
}

/// File-backed implementation of `AgentStore`.
pub struct JsonFileAgentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileAgentStore {
    /// Open (and if necessary seed) the registry file at `path`.
    ///
    /// Parent directories are created; a missing file is initialized to an
    /// empty document so a fresh deployment starts clean.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        if tokio::fs::try_exists(&store.path).await.unwrap_or(false) {
            return Ok(store);
        }
        store.write_document(&RegistryDocument::default()).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the durable document, degrading to empty on any failure.
    ///
    /// A missing or corrupt file means "no agents yet", never an error --
    /// callers of `list` must keep working through storage trouble.
    async fn read_document(&self) -> RegistryDocument {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return RegistryDocument::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "registry unreadable, treating as empty");
                return RegistryDocument::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "registry corrupt, treating as empty");
                RegistryDocument::default()
            }
        }
    }

    /// Atomically replace the durable document.
    async fn write_document(&self, document: &RegistryDocument) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| RegistryError::Encode(e.to_string()))?;

        let mut tmp_path = self.path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl AgentStore for JsonFileAgentStore {
    async fn list(&self) -> Result<Vec<Agent>, RegistryError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await.agents)
    }

    async fn upsert(&self, agent: Agent) -> Result<Agent, RegistryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;

        let stored = match document.agents.iter_mut().find(|a| a.id == agent.id) {
            Some(existing) => {
                // Re-registration refreshes identity fields only; liveness
                // state is owned by set_status.
                existing.name = agent.name;
                existing.endpoint = agent.endpoint;
                existing.clone()
            }
            None => {
                document.agents.push(agent.clone());
                agent
            }
        };

        self.write_document(&document).await?;
        Ok(stored)
    }

    async fn set_status(
        &self,
        id: &str,
        status: AgentStatus,
        observed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Agent>, RegistryError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await;

        let Some(agent) = document.agents.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if agent.status == status {
            // Same status observed again: suppressed, even when the
            // timestamp differs. This is the event-dedup contract.
            return Ok(None);
        }

        agent.status = status;
        agent.last_seen_at = observed_at;
        let updated = agent.clone();

        self.write_document(&document).await?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_store(dir: &tempfile::TempDir) -> JsonFileAgentStore {
        JsonFileAgentStore::open(dir.path().join("data").join("agents.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_seeds_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["agents"], serde_json::json!([]));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_inserts_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let stored = store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        assert_eq!(stored.status, AgentStatus::Inactive);

        let agents = store.list().await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "a1");
    }

    #[tokio::test]
    async fn upsert_twice_keeps_one_record_with_latest_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        store
            .upsert(Agent::new("a1", "Worker1-renamed", "http://localhost:9002"))
            .await
            .unwrap();

        let agents = store.list().await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "Worker1-renamed");
        assert_eq!(agents[0].endpoint, "http://localhost:9002");
    }

    #[tokio::test]
    async fn reregistration_preserves_status_and_last_seen() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let seen = Utc::now();

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        store
            .set_status("a1", AgentStatus::Active, Some(seen))
            .await
            .unwrap()
            .unwrap();

        let stored = store
            .upsert(Agent::new("a1", "Renamed", "http://localhost:9002"))
            .await
            .unwrap();

        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.status, AgentStatus::Active);
        assert_eq!(stored.last_seen_at, Some(seen));
    }

    #[tokio::test]
    async fn set_status_on_unknown_id_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let result = store
            .set_status("ghost", AgentStatus::Active, Some(Utc::now()))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn set_status_same_status_is_suppressed_and_keeps_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let first = Utc::now();

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        store
            .set_status("a1", AgentStatus::Active, Some(first))
            .await
            .unwrap()
            .unwrap();

        // Same status with a newer timestamp: still suppressed.
        let later = first + chrono::Duration::seconds(30);
        let result = store
            .set_status("a1", AgentStatus::Active, Some(later))
            .await
            .unwrap();
        assert!(result.is_none());

        let agents = store.list().await.unwrap();
        assert_eq!(agents[0].last_seen_at, Some(first));
    }

    #[tokio::test]
    async fn set_status_transition_updates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let seen = Utc::now();

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        let updated = store
            .set_status("a1", AgentStatus::Active, Some(seen))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AgentStatus::Active);
        assert_eq!(updated.last_seen_at, Some(seen));

        // A fresh store over the same file sees the persisted state.
        let reopened = JsonFileAgentStore::open(store.path().to_path_buf())
            .await
            .unwrap();
        let agents = reopened.list().await.unwrap();
        assert_eq!(agents[0].status, AgentStatus::Active);
        assert_eq!(agents[0].last_seen_at, Some(seen));
    }

    #[tokio::test]
    async fn going_inactive_keeps_the_prior_last_seen() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let seen = Utc::now();

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        store
            .set_status("a1", AgentStatus::Active, Some(seen))
            .await
            .unwrap();

        // The monitor passes the previously recorded timestamp on failure.
        let updated = store
            .set_status("a1", AgentStatus::Inactive, Some(seen))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AgentStatus::Inactive);
        assert_eq!(updated.last_seen_at, Some(seen));
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");
        tokio::fs::write(&path, b"{not json at all").await.unwrap();

        let store = JsonFileAgentStore::open(&path).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        // A mutation through the store replaces the corrupt state cleanly.
        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn writes_leave_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert(Agent::new("a1", "Worker1", "http://localhost:9001"))
            .await
            .unwrap();

        let mut tmp = store.path().as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!tokio::fs::try_exists(PathBuf::from(tmp)).await.unwrap());
    }
}
