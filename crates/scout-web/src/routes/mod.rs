//! Route handlers.

pub mod dashboard;
pub mod fragments;
pub mod workflows;

use axum::http::StatusCode;
use scout_core::{ScoutError, WorkflowKind};

/// Error half of every JSON handler.
pub type ApiError = (StatusCode, String);

/// Resolve the `{workflow}` path segment.
pub(crate) fn parse_kind(segment: &str) -> Result<WorkflowKind, ApiError> {
    WorkflowKind::parse(segment).map_err(|e| (StatusCode::NOT_FOUND, e.to_string()))
}

pub(crate) fn error_status(err: &ScoutError) -> StatusCode {
    match err {
        ScoutError::UnknownWorkflow(_) => StatusCode::NOT_FOUND,
        ScoutError::UnknownField { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
