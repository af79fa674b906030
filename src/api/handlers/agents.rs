use crate::AppState;
use crate::types::{
    AgentInfo, CreateAgentRequest, CreateAgentResponse, ListAgentsResponse, MessageResponse,
    Result,
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Create a named agent
///
/// POST /agent/create
pub async fn create_agent(
    State(state): State<AppState>,
    Json(req): Json<CreateAgentRequest>,
) -> Result<Json<CreateAgentResponse>> {
    let kind = req.kind.unwrap_or(state.registry.default_kind());
    state.registry.create(&req.agent_name, Some(kind))?;

    Ok(Json(CreateAgentResponse {
        message: format!("Agent '{}' created successfully", req.agent_name),
        agent_name: req.agent_name,
        kind,
    }))
}

/// List agent names
///
/// GET /agent/list
pub async fn list_agents(State(state): State<AppState>) -> Json<ListAgentsResponse> {
    let agents = state.registry.list();
    Json(ListAgentsResponse {
        total: agents.len(),
        agents,
    })
}

/// GET /agent/{name}
pub async fn get_agent(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AgentInfo>> {
    Ok(Json(state.registry.info(&name).await?))
}

/// DELETE /agent/{name}
pub async fn delete_agent(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.registry.delete(&name)?;
    Ok(Json(MessageResponse {
        message: format!("Agent '{}' deleted", name),
        agent_name: name,
    }))
}
