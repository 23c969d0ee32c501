//! Liveness monitor: the background loop that drives agent status from
//! network reality.
//!
//! Each sweep snapshots the registry, probes every agent's `/ping`, and
//! writes the observed status back through [`AgentStore::set_status`]. The
//! store's dedup contract means only actual transitions come back as updated
//! records, and only those are broadcast -- an agent that stays up (or stays
//! down) across sweeps produces no traffic.
//!
//! The loop is built to outlive everything: a probe failure is a status
//! signal, not an error; a store failure is logged and skipped; nothing
//! short of process shutdown stops it.

pub mod probe;

use std::sync::Arc;
use std::time::Duration;

use station_types::agent::{Agent, AgentStatus};
use station_types::event::StationEvent;

use crate::hub::NotificationHub;
use crate::repository::agent::AgentStore;
use self::probe::{AgentProber, ProbeOutcome};

/// Background liveness-probing state machine.
pub struct LivenessMonitor<S, P> {
    store: Arc<S>,
    prober: P,
    hub: Arc<NotificationHub>,
    interval: Duration,
}

impl<S: AgentStore, P: AgentProber> LivenessMonitor<S, P> {
    pub fn new(store: Arc<S>, prober: P, hub: Arc<NotificationHub>, interval: Duration) -> Self {
        Self {
            store,
            prober,
            hub,
            interval,
        }
    }

    /// Run forever. Intended to be driven by a dedicated spawned task.
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "liveness monitor started");
        loop {
            self.tick().await;
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One full sweep over the registry. Errors never escape a tick.
    pub async fn tick(&self) {
        let agents = match self.store.list().await {
            Ok(agents) => agents,
            Err(err) => {
                tracing::warn!(error = %err, "liveness sweep could not read registry");
                return;
            }
        };

        for agent in agents {
            self.check_agent(agent).await;
        }
    }

    /// Probe one agent and apply the observed status.
    ///
    /// A failed probe does not advance `last_seen_at`: the candidate
    /// timestamp on the inactive path is whatever the registry last
    /// recorded, preserving the time of the last successful probe.
    async fn check_agent(&self, agent: Agent) {
        let (status, observed_at) = match self.prober.probe(&agent.endpoint).await {
            ProbeOutcome::Up(at) => (AgentStatus::Active, Some(at)),
            ProbeOutcome::Down(reason) => {
                tracing::trace!(agent_id = %agent.id, %reason, "probe failed");
                (AgentStatus::Inactive, agent.last_seen_at)
            }
        };

        match self.store.set_status(&agent.id, status, observed_at).await {
            Ok(Some(updated)) => {
                tracing::info!(
                    agent_id = %updated.id,
                    status = %updated.status,
                    "agent status changed"
                );
                self.hub
                    .broadcast(StationEvent::AgentStatusChanged { agent: updated })
                    .await;
            }
            Ok(None) => {}
            Err(err) => {
                // The write failed for this one agent; the sweep moves on.
                tracing::warn!(agent_id = %agent.id, error = %err, "failed to persist agent status");
            }
        }
    }
}
