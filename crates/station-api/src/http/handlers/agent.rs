//! Agent registry handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use station_core::repository::agent::AgentStore;
use station_types::agent::{Agent, AgentStatus, RegisterAgentRequest};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AgentListQuery {
    /// Filter by status: active|inactive. Unknown values are ignored.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgentListResponse {
    pub agents: Vec<Agent>,
}

/// GET /agents - Snapshot of all registered agents.
pub async fn list_agents(
    State(state): State<AppState>,
    Query(query): Query<AgentListQuery>,
) -> Result<Json<AgentListResponse>, AppError> {
    let mut agents = state.store.list().await?;

    if let Some(status) = query.status.as_deref().and_then(|s| s.parse::<AgentStatus>().ok()) {
        agents.retain(|a| a.status == status);
    }

    Ok(Json(AgentListResponse { agents }))
}

/// POST /agent - Register (or re-register) an agent.
///
/// A fresh registration starts inactive with no last-seen time; an existing
/// id keeps its current liveness state and only refreshes name/endpoint.
pub async fn register_agent(
    State(state): State<AppState>,
    Json(body): Json<RegisterAgentRequest>,
) -> Result<Json<Agent>, AppError> {
    body.validate()?;

    let stored = state
        .store
        .upsert(Agent::new(body.id, body.name, body.endpoint))
        .await?;

    tracing::info!(agent_id = %stored.id, endpoint = %stored.endpoint, "agent registered");
    Ok(Json(stored))
}
