//! Form-submit-results workflows.
//!
//! Both dashboard workflows share one state machine, [`WorkflowController`],
//! parametrized by a [`Workflow`] implementation that supplies the form
//! fields, validation, prompt template, target agent and result decoder.

pub mod controller;

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{ScoutError, ScoutResult};
pub use controller::{resolve_outcome, Submission, Ticket, ViewState, WorkflowController, WorkflowSnapshot};

/// Shown when the agent call never produced an envelope.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Shown when the call succeeded but no result could be recovered from it.
pub const PARSE_ERROR_MESSAGE: &str = "Could not parse the response from the agent. Please try again.";

/// Identifies one of the two workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Match,
    Discover,
}

impl WorkflowKind {
    /// Parse from a route segment.
    pub fn parse(s: &str) -> ScoutResult<Self> {
        match s.to_lowercase().as_str() {
            "match" | "matching" => Ok(Self::Match),
            "discover" | "discovery" | "research" => Ok(Self::Discover),
            _ => Err(ScoutError::UnknownWorkflow(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Discover => "discover",
        }
    }
}

/// Per-field validation flags. Only flagged fields are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, bool>);

impl FieldErrors {
    pub fn flag(&mut self, field: &'static str) {
        self.0.insert(field, true);
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_flagged(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flagged field names, sorted.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }
}

/// The parts that differ between workflows.
pub trait Workflow: Send + Sync + 'static {
    type Form: Clone + Default + Debug + Serialize + Send + Sync;
    type Output: Clone + Debug + Serialize + Send + Sync;

    const KIND: WorkflowKind;
    /// Agent that serves this workflow.
    const AGENT_ID: &'static str;
    /// Message used when the agent reports failure without error text.
    const FAILURE_FALLBACK: &'static str;
    /// Fields that must be non-blank before submitting.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Read a form field by name.
    fn field<'a>(form: &'a Self::Form, name: &str) -> Option<&'a str>;

    /// Write a form field by name; returns `false` for an unknown field.
    fn set_field(form: &mut Self::Form, name: &str, value: String) -> bool;

    /// Natural-language prompt sent to the agent.
    fn prompt(form: &Self::Form) -> String;

    /// Typed view of a normalized agent value.
    fn decode(normalized: Value) -> Option<Self::Output>;

    fn sample_form() -> Self::Form;

    fn sample_output() -> Self::Output;

    /// Number of cards the output renders.
    fn item_count(output: &Self::Output) -> usize;

    /// Flag every required field that is blank after trimming.
    fn validate(form: &Self::Form) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for &field in Self::REQUIRED_FIELDS {
            let blank = Self::field(form, field).map_or(true, |v| v.trim().is_empty());
            if blank {
                errors.flag(field);
            }
        }
        errors
    }
}
