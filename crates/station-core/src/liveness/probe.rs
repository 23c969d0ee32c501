//! Probe outcome type and prober trait.
//!
//! A probe never throws: every network failure, timeout, or non-200 response
//! is folded into [`ProbeOutcome::Down`] so the monitor's transition logic
//! consumes plain values.

use chrono::{DateTime, Utc};

/// Result of one liveness probe against an agent endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The agent answered HTTP 200. Carries the observation time, which
    /// becomes the agent's `last_seen_at` on transition to active.
    Up(DateTime<Utc>),

    /// Anything else: non-200 status, connection error, or timeout.
    Down(String),
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(self, ProbeOutcome::Up(_))
    }
}

/// Issues bounded-timeout liveness probes.
///
/// The concrete HTTP implementation lives in station-infra; the monitor is
/// generic over this trait so its state machine can be tested with scripted
/// outcomes.
pub trait AgentProber: Send + Sync {
    /// Probe the agent reachable at `endpoint`.
    fn probe(
        &self,
        endpoint: &str,
    ) -> impl std::future::Future<Output = ProbeOutcome> + Send;
}
