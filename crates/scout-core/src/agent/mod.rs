//! Agent registry and the invocation seam.

pub mod envelope;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ScoutResult;
pub use envelope::AgentEnvelope;

/// Agent that runs the profile-matching workflow.
pub const MATCH_ORCHESTRATOR_ID: &str = "699ada8321096e9c61f06e1a";

/// Agent that runs the dataset-discovery workflow.
pub const DATASET_DISCOVERY_ID: &str = "699ada9932558c5716f1d41f";

const INTENT_ANALYZER_ID: &str = "699ada6221096e9c61f06e16";
const COMPATIBILITY_MATCHER_ID: &str = "699ada6281cd1b955343e301";

/// Whether an agent is invoked directly or only coordinated by another agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Primary,
    SubAgent,
}

/// A known agent on the remote platform.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgentProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub purpose: &'static str,
    pub role: AgentRole,
}

/// All agents shown on the dashboard, in display order.
pub const AGENTS: &[AgentProfile] = &[
    AgentProfile {
        id: MATCH_ORCHESTRATOR_ID,
        name: "Match Orchestrator Manager",
        purpose: "Coordinates intent analysis and compatibility matching",
        role: AgentRole::Primary,
    },
    AgentProfile {
        id: INTENT_ANALYZER_ID,
        name: "Intent Analyzer Agent",
        purpose: "Analyzes user intent (sub-agent)",
        role: AgentRole::SubAgent,
    },
    AgentProfile {
        id: COMPATIBILITY_MATCHER_ID,
        name: "Compatibility Matcher Agent",
        purpose: "Scores compatibility (sub-agent)",
        role: AgentRole::SubAgent,
    },
    AgentProfile {
        id: DATASET_DISCOVERY_ID,
        name: "Dataset Discovery Agent",
        purpose: "Finds relevant research datasets",
        role: AgentRole::Primary,
    },
];

/// Look up an agent by id.
pub fn find_agent(id: &str) -> Option<&'static AgentProfile> {
    AGENTS.iter().find(|a| a.id == id)
}

/// Sends a prompt to a remote agent.
///
/// `Err` means the call never produced an envelope (connection refused,
/// timeout, undecodable transport). A platform-level failure comes back
/// as `Ok` with `success == false`.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, message: &str, agent_id: &str) -> ScoutResult<AgentEnvelope>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_roles() {
        assert_eq!(AGENTS.len(), 4);
        let primaries: Vec<_> = AGENTS.iter().filter(|a| a.role == AgentRole::Primary).map(|a| a.id).collect();
        assert_eq!(primaries, vec![MATCH_ORCHESTRATOR_ID, DATASET_DISCOVERY_ID]);
    }

    #[test]
    fn test_find_agent() {
        assert_eq!(find_agent(DATASET_DISCOVERY_ID).unwrap().name, "Dataset Discovery Agent");
        assert!(find_agent("missing").is_none());
    }
}
