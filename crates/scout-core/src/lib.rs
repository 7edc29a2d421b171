//! Scout Core Library
//!
//! Domain models, agent response normalization and workflow state for the
//! Scout dashboard. Network transport lives in `scout-agent`; this crate
//! only defines the [`agent::AgentInvoker`] seam it plugs into.

pub mod agent;
pub mod config;
pub mod dashboard;
pub mod decode;
pub mod discovery;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod present;
pub mod sample;
pub mod workflow;

pub use config::ScoutConfig;
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use error::{ScoutError, ScoutResult};
pub use normalize::normalize;
pub use workflow::{Submission, Ticket, ViewState, Workflow, WorkflowKind};
