//! Per-workflow JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use scout_core::{Dashboard, Submission, WorkflowKind};

use super::{error_status, parse_kind, ApiError};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ExpandResponse {
    pub expanded: Option<usize>,
}

fn snapshot_response(dashboard: &Dashboard, kind: WorkflowKind, status: StatusCode) -> Response {
    let sample_mode = dashboard.sample_mode();
    match kind {
        WorkflowKind::Match => (status, Json(dashboard.matching.snapshot(sample_mode))).into_response(),
        WorkflowKind::Discover => (status, Json(dashboard.discovery.snapshot(sample_mode))).into_response(),
    }
}

/// GET /api/{workflow}
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow): Path<String>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&workflow)?;
    let dashboard = state.dashboard.lock().await;
    Ok(snapshot_response(&dashboard, kind, StatusCode::OK))
}

/// PUT /api/{workflow}/form - Edit one or more fields.
pub async fn update_form(
    State(state): State<AppState>,
    Path(workflow): Path<String>,
    Json(fields): Json<BTreeMap<String, String>>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&workflow)?;
    state
        .update(kind, |d| d.set_fields(kind, fields))
        .await
        .map_err(|e| (error_status(&e), e.to_string()))?;

    let dashboard = state.dashboard.lock().await;
    Ok(snapshot_response(&dashboard, kind, StatusCode::OK))
}

async fn start(state: AppState, workflow: String, retry: bool) -> Result<Response, ApiError> {
    let kind = parse_kind(&workflow)?;
    let status = match state.submit(kind, retry).await {
        Submission::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Submission::Completed => StatusCode::OK,
        Submission::Dispatch(_) => StatusCode::ACCEPTED,
    };

    let dashboard = state.dashboard.lock().await;
    Ok(snapshot_response(&dashboard, kind, status))
}

/// POST /api/{workflow}/submit
pub async fn submit(State(state): State<AppState>, Path(workflow): Path<String>) -> Result<Response, ApiError> {
    start(state, workflow, false).await
}

/// POST /api/{workflow}/retry
pub async fn retry(State(state): State<AppState>, Path(workflow): Path<String>) -> Result<Response, ApiError> {
    start(state, workflow, true).await
}

/// POST /api/{workflow}/cancel
pub async fn cancel(State(state): State<AppState>, Path(workflow): Path<String>) -> Result<Response, ApiError> {
    let kind = parse_kind(&workflow)?;
    if !state.cancel(kind).await {
        return Err((StatusCode::CONFLICT, format!("No {} submission in progress", kind.as_str())));
    }

    let dashboard = state.dashboard.lock().await;
    Ok(snapshot_response(&dashboard, kind, StatusCode::OK))
}

/// POST /api/{workflow}/expand/{index}
pub async fn toggle_expanded(
    State(state): State<AppState>,
    Path((workflow, index)): Path<(String, usize)>,
) -> Result<Json<ExpandResponse>, ApiError> {
    let kind = parse_kind(&workflow)?;
    let expanded = state.update(kind, |d| d.toggle_expanded(kind, index)).await;
    Ok(Json(ExpandResponse { expanded }))
}
