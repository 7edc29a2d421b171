//! Dashboard page, snapshot and shared toggles.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use scout_core::dashboard::AgentStatus;
use scout_core::DashboardSnapshot;

use super::{parse_kind, ApiError};
use crate::state::AppState;

const DASHBOARD_HTML: &str = include_str!("../../assets/index.html");

#[derive(Deserialize)]
pub struct SampleModeRequest {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct ActiveTabRequest {
    pub workflow: String,
}

/// GET / - Serve the dashboard page.
pub async fn index() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.lock().await.snapshot())
}

/// GET /api/agents
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentStatus>> {
    Json(state.dashboard.lock().await.agents())
}

/// PUT /api/sample-mode
pub async fn set_sample_mode(
    State(state): State<AppState>,
    Json(req): Json<SampleModeRequest>,
) -> Json<DashboardSnapshot> {
    state.set_sample_mode(req.enabled).await;
    Json(state.dashboard.lock().await.snapshot())
}

/// PUT /api/active-tab
pub async fn set_active_tab(
    State(state): State<AppState>,
    Json(req): Json<ActiveTabRequest>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let kind = parse_kind(&req.workflow)?;
    let left = state.dashboard.lock().await.active_tab();
    state.update(left, |d| d.switch_tab(kind)).await;
    Ok(Json(state.dashboard.lock().await.snapshot()))
}
