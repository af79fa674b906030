use crate::AppState;
use crate::types::{HistoryResponse, MessageResponse, Result};
use axum::{
    Json,
    extract::{Path, State},
};

/// Past calls of one agent, oldest first
///
/// GET /agent/{name}/history
pub async fn get_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<HistoryResponse>> {
    let history = state.registry.history(&name).await?;
    Ok(Json(HistoryResponse {
        agent_name: name,
        history,
    }))
}

/// DELETE /agent/{name}/history
pub async fn clear_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.registry.clear_history(&name).await?;
    Ok(Json(MessageResponse {
        message: format!("History of agent '{}' cleared", name),
        agent_name: name,
    }))
}
