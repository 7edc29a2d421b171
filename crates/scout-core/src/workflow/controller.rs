//! Per-workflow view state machine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{FieldErrors, Workflow, WorkflowKind, NETWORK_ERROR_MESSAGE, PARSE_ERROR_MESSAGE};
use crate::agent::{AgentEnvelope, AgentInvoker};
use crate::error::{ScoutError, ScoutResult};
use crate::normalize::normalize;

/// What the results panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ViewState<O> {
    Empty,
    Loading { generation: u64 },
    Success { result: O },
    Error { message: String },
}

impl<O> ViewState<O> {
    /// Serialized tag of the state.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }
}

/// An invocation handed out by [`WorkflowController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub workflow: WorkflowKind,
    pub generation: u64,
    pub agent_id: &'static str,
    pub message: String,
    pub dispatched_at: DateTime<Utc>,
}

/// Outcome of a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Required fields were blank; nothing was sent.
    Invalid(FieldErrors),
    /// Sample mode filled the result directly.
    Completed,
    /// The caller must invoke the agent and report back with [`WorkflowController::complete`].
    Dispatch(Ticket),
}

/// Map an invocation outcome to the state it produces.
pub fn resolve_outcome<W: Workflow>(outcome: ScoutResult<AgentEnvelope>) -> ViewState<W::Output> {
    let envelope = match outcome {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(workflow = W::KIND.as_str(), error = %e, "Agent invocation failed");
            return ViewState::Error { message: NETWORK_ERROR_MESSAGE.to_string() };
        }
    };

    if !envelope.success() {
        let message = envelope.error().unwrap_or(W::FAILURE_FALLBACK).to_string();
        warn!(workflow = W::KIND.as_str(), message = %message, "Agent reported failure");
        return ViewState::Error { message };
    }

    match normalize(envelope.raw()).and_then(W::decode) {
        Some(result) => ViewState::Success { result },
        None => {
            warn!(workflow = W::KIND.as_str(), "Agent response could not be normalized");
            ViewState::Error { message: PARSE_ERROR_MESSAGE.to_string() }
        }
    }
}

/// Form, validation flags and result state of one workflow.
#[derive(Debug, Clone)]
pub struct WorkflowController<W: Workflow> {
    form: W::Form,
    field_errors: FieldErrors,
    state: ViewState<W::Output>,
    expanded: Option<usize>,
    generation: u64,
}

impl<W: Workflow> Default for WorkflowController<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Workflow> WorkflowController<W> {
    pub fn new() -> Self {
        Self {
            form: W::Form::default(),
            field_errors: FieldErrors::default(),
            state: ViewState::Empty,
            expanded: None,
            generation: 0,
        }
    }

    pub fn form(&self) -> &W::Form {
        &self.form
    }

    pub fn state(&self) -> &ViewState<W::Output> {
        &self.state
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Index of the expanded card, if any.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    pub fn result(&self) -> Option<&W::Output> {
        match &self.state {
            ViewState::Success { result } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Edit one field. Clears that field's validation flag.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> ScoutResult<()> {
        if !W::set_field(&mut self.form, name, value.into()) {
            return Err(ScoutError::UnknownField {
                workflow: W::KIND.as_str().to_string(),
                field: name.to_string(),
            });
        }
        self.field_errors.clear(name);
        Ok(())
    }

    /// Replace the whole form, clearing all validation flags.
    pub fn replace_form(&mut self, form: W::Form) {
        self.form = form;
        self.field_errors = FieldErrors::default();
    }

    /// Validate and start a submission.
    ///
    /// In sample mode the canned output replaces the state immediately and
    /// nothing is dispatched. Otherwise the controller enters `Loading`
    /// and returns a ticket; any earlier ticket becomes stale.
    pub fn submit(&mut self, sample_mode: bool) -> Submission {
        if sample_mode {
            self.field_errors = FieldErrors::default();
            self.generation += 1;
            self.state = ViewState::Success { result: W::sample_output() };
            self.expanded = None;
            debug!(workflow = W::KIND.as_str(), "Sample result loaded");
            return Submission::Completed;
        }

        let errors = W::validate(&self.form);
        if !errors.is_empty() {
            debug!(workflow = W::KIND.as_str(), fields = ?errors.fields(), "Submission blocked by validation");
            self.field_errors = errors.clone();
            return Submission::Invalid(errors);
        }
        self.field_errors = FieldErrors::default();

        self.generation += 1;
        self.state = ViewState::Loading { generation: self.generation };
        self.expanded = None;

        let ticket = Ticket {
            id: Uuid::new_v4(),
            workflow: W::KIND,
            generation: self.generation,
            agent_id: W::AGENT_ID,
            message: W::prompt(&self.form),
            dispatched_at: Utc::now(),
        };
        info!(workflow = W::KIND.as_str(), ticket = %ticket.id, agent_id = ticket.agent_id, "Submission dispatched");
        Submission::Dispatch(ticket)
    }

    /// Re-run the submit with the current form.
    pub fn retry(&mut self, sample_mode: bool) -> Submission {
        self.submit(sample_mode)
    }

    /// Settle a dispatched ticket. Returns `false` (and changes nothing)
    /// when the ticket was superseded or cancelled.
    pub fn complete(&mut self, ticket: &Ticket, outcome: ScoutResult<AgentEnvelope>) -> bool {
        let current = matches!(self.state, ViewState::Loading { generation } if generation == ticket.generation);
        if !current {
            debug!(workflow = W::KIND.as_str(), ticket = %ticket.id, "Ignoring stale completion");
            return false;
        }

        self.state = resolve_outcome::<W>(outcome);
        let elapsed_ms = (Utc::now() - ticket.dispatched_at).num_milliseconds();
        if let ViewState::Success { result } = &self.state {
            info!(workflow = W::KIND.as_str(), ticket = %ticket.id, items = W::item_count(result), elapsed_ms, "Submission completed");
        }
        true
    }

    /// Abandon a loading submission. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.generation += 1;
        self.state = ViewState::Empty;
        info!(workflow = W::KIND.as_str(), "Submission cancelled");
        true
    }

    /// Drop a settled result or error. A loading submission is left alone.
    pub fn discard(&mut self) {
        if !self.is_loading() {
            self.state = ViewState::Empty;
            self.expanded = None;
        }
    }

    /// Expand card `index`, or collapse it when it is already expanded.
    /// At most one card is expanded; out-of-range indexes are ignored.
    pub fn toggle_expanded(&mut self, index: usize) -> Option<usize> {
        let in_range = self.result().map_or(false, |r| index < W::item_count(r));
        if in_range {
            self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
        }
        self.expanded
    }

    /// Run a whole submit-invoke-settle cycle.
    pub async fn run(&mut self, invoker: &dyn AgentInvoker, sample_mode: bool) -> &ViewState<W::Output> {
        if let Submission::Dispatch(ticket) = self.submit(sample_mode) {
            let outcome = invoker.invoke(&ticket.message, ticket.agent_id).await;
            self.complete(&ticket, outcome);
        }
        &self.state
    }

    /// Serializable view. In sample mode the sample form is what is shown.
    pub fn snapshot(&self, sample_mode: bool) -> WorkflowSnapshot<W::Form, W::Output> {
        WorkflowSnapshot {
            workflow: W::KIND,
            agent_id: W::AGENT_ID,
            form: if sample_mode { W::sample_form() } else { self.form.clone() },
            read_only: sample_mode,
            field_errors: self.field_errors.clone(),
            loading: self.is_loading(),
            state: self.state.clone(),
            expanded: self.expanded,
        }
    }
}

/// Everything the presentation layer needs for one workflow.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowSnapshot<F, O> {
    pub workflow: WorkflowKind,
    pub agent_id: &'static str,
    pub form: F,
    pub read_only: bool,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub state: ViewState<O>,
    pub expanded: Option<usize>,
}
