//! Mode handlers. Unknown agents are created on first use with the
//! registry's default kind.

use crate::AppState;
use crate::types::{AskRequest, PlanRequest, ResponseEnvelope, Result, StudyRequest};
use axum::{
    Json,
    extract::{Path, State},
};

/// POST /agent/{name}/ask
pub async fn ask(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<AskRequest>,
) -> Result<Json<ResponseEnvelope>> {
    let envelope = state.registry.ask(&name, &req.prompt).await?;
    Ok(Json(envelope))
}

/// POST /agent/{name}/study
pub async fn study(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<StudyRequest>,
) -> Result<Json<ResponseEnvelope>> {
    let envelope = state
        .registry
        .study(&name, &req.prompt, req.context.as_deref())
        .await?;
    Ok(Json(envelope))
}

/// POST /agent/{name}/plan
pub async fn plan(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<ResponseEnvelope>> {
    let envelope = state
        .registry
        .plan(&name, &req.prompt, req.goals.as_deref())
        .await?;
    Ok(Json(envelope))
}
