//! Agent record types for Station.
//!
//! An `Agent` is a remote process that registered itself with the hub and is
//! probed for liveness at its callback endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Liveness status of a registered agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AgentStatus::Active),
            "inactive" => Ok(AgentStatus::Inactive),
            other => Err(AgentError::InvalidStatus(other.to_string())),
        }
    }
}

/// A registered agent record.
///
/// `id` is the primary key, assigned by the registrant and immutable once
/// created. `last_seen_at` records the time of the last successful probe;
/// it is never cleared when the agent goes inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    /// Base URL probed at `{endpoint}/ping`.
    pub endpoint: String,
    pub status: AgentStatus,
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Create a fresh registration: inactive, never seen.
    pub fn new(id: impl Into<String>, name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            endpoint: endpoint.into(),
            status: AgentStatus::Inactive,
            last_seen_at: None,
        }
    }
}

/// Registration payload accepted by `POST /agent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAgentRequest {
    pub id: String,
    pub name: String,
    pub endpoint: String,
}

impl RegisterAgentRequest {
    /// Validate the registration at the boundary.
    ///
    /// The endpoint must be an absolute http(s) URL with a host; malformed
    /// records are rejected here and never reach the registry.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.id.trim().is_empty() {
            return Err(AgentError::InvalidId);
        }
        if self.name.trim().is_empty() {
            return Err(AgentError::InvalidName("name cannot be empty".to_string()));
        }
        validate_endpoint(&self.endpoint)?;
        Ok(())
    }
}

/// Check that `endpoint` parses as an absolute http(s) URL with a host.
pub fn validate_endpoint(endpoint: &str) -> Result<(), AgentError> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|e| AgentError::InvalidEndpoint(format!("'{endpoint}': {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AgentError::InvalidEndpoint(format!(
            "'{endpoint}': scheme must be http or https"
        )));
    }
    if parsed.host_str().is_none() {
        return Err(AgentError::InvalidEndpoint(format!(
            "'{endpoint}': missing host"
        )));
    }
    Ok(())
}
