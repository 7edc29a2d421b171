//! Dashboard state: both workflows, the sample-data toggle and the
//! active agent indicator.

use serde::Serialize;
use tracing::info;

use crate::agent::{AgentEnvelope, AgentProfile, AgentRole, AGENTS};
use crate::discovery::{DatasetResult, DiscoveryWorkflow, ResearchForm};
use crate::error::{ScoutError, ScoutResult};
use crate::matching::{MatchForm, MatchResult, MatchWorkflow};
use crate::workflow::{Submission, Ticket, Workflow, WorkflowController, WorkflowKind, WorkflowSnapshot};

/// Agent entry with its live status.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    #[serde(flatten)]
    pub profile: AgentProfile,
    pub active: bool,
}

/// Serializable view of the whole dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub sample_mode: bool,
    pub active_tab: WorkflowKind,
    pub active_agent_id: Option<&'static str>,
    pub agents: Vec<AgentStatus>,
    pub matching: WorkflowSnapshot<MatchForm, MatchResult>,
    pub discovery: WorkflowSnapshot<ResearchForm, DatasetResult>,
}

/// Both workflows plus the shared toggles.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub matching: WorkflowController<MatchWorkflow>,
    pub discovery: WorkflowController<DiscoveryWorkflow>,
    sample_mode: bool,
    active_tab: WorkflowKind,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Dashboard {
    pub fn new(sample_mode: bool) -> Self {
        Self {
            matching: WorkflowController::new(),
            discovery: WorkflowController::new(),
            sample_mode,
            active_tab: WorkflowKind::Match,
        }
    }

    pub fn sample_mode(&self) -> bool {
        self.sample_mode
    }

    pub fn set_sample_mode(&mut self, enabled: bool) {
        if self.sample_mode != enabled {
            info!(enabled, "Sample data mode changed");
        }
        self.sample_mode = enabled;
    }

    pub fn toggle_sample_mode(&mut self) -> bool {
        self.set_sample_mode(!self.sample_mode);
        self.sample_mode
    }

    pub fn active_tab(&self) -> WorkflowKind {
        self.active_tab
    }

    /// Switch tabs. The result of the workflow being left is discarded.
    pub fn switch_tab(&mut self, kind: WorkflowKind) {
        if kind == self.active_tab {
            return;
        }
        match self.active_tab {
            WorkflowKind::Match => self.matching.discard(),
            WorkflowKind::Discover => self.discovery.discard(),
        }
        self.active_tab = kind;
    }

    /// Agent currently working on a submission, if any.
    pub fn active_agent_id(&self) -> Option<&'static str> {
        if self.matching.is_loading() {
            Some(MatchWorkflow::AGENT_ID)
        } else if self.discovery.is_loading() {
            Some(DiscoveryWorkflow::AGENT_ID)
        } else {
            None
        }
    }

    pub fn is_loading(&self, kind: WorkflowKind) -> bool {
        match kind {
            WorkflowKind::Match => self.matching.is_loading(),
            WorkflowKind::Discover => self.discovery.is_loading(),
        }
    }

    pub fn phase(&self, kind: WorkflowKind) -> &'static str {
        match kind {
            WorkflowKind::Match => self.matching.state().phase(),
            WorkflowKind::Discover => self.discovery.state().phase(),
        }
    }

    pub fn set_field(&mut self, kind: WorkflowKind, name: &str, value: impl Into<String>) -> ScoutResult<()> {
        match kind {
            WorkflowKind::Match => self.matching.set_field(name, value),
            WorkflowKind::Discover => self.discovery.set_field(name, value),
        }
    }

    /// Whether `kind`'s form has a field called `name`.
    pub fn has_field(&self, kind: WorkflowKind, name: &str) -> bool {
        match kind {
            WorkflowKind::Match => MatchWorkflow::field(self.matching.form(), name).is_some(),
            WorkflowKind::Discover => DiscoveryWorkflow::field(self.discovery.form(), name).is_some(),
        }
    }

    /// Edit several fields at once. Nothing is changed when any name is unknown.
    pub fn set_fields<I>(&mut self, kind: WorkflowKind, fields: I) -> ScoutResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let fields: Vec<(String, String)> = fields.into_iter().collect();
        if let Some((name, _)) = fields.iter().find(|(name, _)| !self.has_field(kind, name)) {
            return Err(ScoutError::UnknownField {
                workflow: kind.as_str().to_string(),
                field: name.clone(),
            });
        }
        for (name, value) in fields {
            self.set_field(kind, &name, value)?;
        }
        Ok(())
    }

    pub fn submit(&mut self, kind: WorkflowKind) -> Submission {
        let sample_mode = self.sample_mode;
        match kind {
            WorkflowKind::Match => self.matching.submit(sample_mode),
            WorkflowKind::Discover => self.discovery.submit(sample_mode),
        }
    }

    pub fn retry(&mut self, kind: WorkflowKind) -> Submission {
        let sample_mode = self.sample_mode;
        match kind {
            WorkflowKind::Match => self.matching.retry(sample_mode),
            WorkflowKind::Discover => self.discovery.retry(sample_mode),
        }
    }

    /// Route a settled ticket to its workflow.
    pub fn complete(&mut self, ticket: &Ticket, outcome: ScoutResult<AgentEnvelope>) -> bool {
        match ticket.workflow {
            WorkflowKind::Match => self.matching.complete(ticket, outcome),
            WorkflowKind::Discover => self.discovery.complete(ticket, outcome),
        }
    }

    pub fn cancel(&mut self, kind: WorkflowKind) -> bool {
        match kind {
            WorkflowKind::Match => self.matching.cancel(),
            WorkflowKind::Discover => self.discovery.cancel(),
        }
    }

    pub fn toggle_expanded(&mut self, kind: WorkflowKind, index: usize) -> Option<usize> {
        match kind {
            WorkflowKind::Match => self.matching.toggle_expanded(index),
            WorkflowKind::Discover => self.discovery.toggle_expanded(index),
        }
    }

    /// Registry entries with the active flag set.
    pub fn agents(&self) -> Vec<AgentStatus> {
        let active = self.active_agent_id();
        AGENTS
            .iter()
            .map(|profile| AgentStatus {
                profile: *profile,
                active: profile.role == AgentRole::Primary && Some(profile.id) == active,
            })
            .collect()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            sample_mode: self.sample_mode,
            active_tab: self.active_tab,
            active_agent_id: self.active_agent_id(),
            agents: self.agents(),
            matching: self.matching.snapshot(self.sample_mode),
            discovery: self.discovery.snapshot(self.sample_mode),
        }
    }
}
