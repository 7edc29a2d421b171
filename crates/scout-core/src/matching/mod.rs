//! Profile matching workflow.

pub mod model;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::MATCH_ORCHESTRATOR_ID;
use crate::sample;
use crate::workflow::{Workflow, WorkflowKind};
pub use model::{MatchItem, MatchResult};

/// Profile submitted for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchForm {
    pub name: String,
    pub bio: String,
    pub preferences: String,
    pub intent: String,
}

/// Build the orchestrator prompt for a profile.
pub fn build_prompt(form: &MatchForm) -> String {
    let preferences = if form.preferences.is_empty() {
        "Not specified"
    } else {
        form.preferences.as_str()
    };

    format!(
        "Find compatible matches for this profile:\nName: {}\nBio: {}\nKey Preferences: {}\nMatching Intent: {}",
        form.name, form.bio, preferences, form.intent
    )
}

/// Marker for the matching workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchWorkflow;

impl Workflow for MatchWorkflow {
    type Form = MatchForm;
    type Output = MatchResult;

    const KIND: WorkflowKind = WorkflowKind::Match;
    const AGENT_ID: &'static str = MATCH_ORCHESTRATOR_ID;
    const FAILURE_FALLBACK: &'static str = "An error occurred while finding matches. Please try again.";
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "bio", "intent"];

    fn field<'a>(form: &'a MatchForm, name: &str) -> Option<&'a str> {
        match name {
            "name" => Some(&form.name),
            "bio" => Some(&form.bio),
            "preferences" => Some(&form.preferences),
            "intent" => Some(&form.intent),
            _ => None,
        }
    }

    fn set_field(form: &mut MatchForm, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut form.name,
            "bio" => &mut form.bio,
            "preferences" => &mut form.preferences,
            "intent" => &mut form.intent,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn prompt(form: &MatchForm) -> String {
        build_prompt(form)
    }

    fn decode(normalized: Value) -> Option<MatchResult> {
        MatchResult::from_normalized(normalized)
    }

    fn sample_form() -> MatchForm {
        sample::match_form()
    }

    fn sample_output() -> MatchResult {
        sample::match_result()
    }

    fn item_count(output: &MatchResult) -> usize {
        output.matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, bio: &str, preferences: &str, intent: &str) -> MatchForm {
        MatchForm {
            name: name.to_string(),
            bio: bio.to_string(),
            preferences: preferences.to_string(),
            intent: intent.to_string(),
        }
    }

    #[test]
    fn test_prompt_template() {
        let prompt = build_prompt(&form("Ada", "Mathematician", "rigor", "Find engineers"));
        assert_eq!(
            prompt,
            "Find compatible matches for this profile:\nName: Ada\nBio: Mathematician\nKey Preferences: rigor\nMatching Intent: Find engineers"
        );
    }

    #[test]
    fn test_prompt_without_preferences() {
        let prompt = build_prompt(&form("Ada", "Mathematician", "", "Find engineers"));
        assert!(prompt.contains("Key Preferences: Not specified"));
    }

    #[test]
    fn test_validation_flags_blank_required_fields() {
        let errors = MatchWorkflow::validate(&form("  ", "bio", "", "\n"));
        assert_eq!(errors.fields(), vec!["intent", "name"]);
    }

    #[test]
    fn test_preferences_optional() {
        assert!(MatchWorkflow::validate(&form("Ada", "bio", "", "intent")).is_empty());
    }

    #[test]
    fn test_set_field() {
        let mut f = MatchForm::default();
        assert!(MatchWorkflow::set_field(&mut f, "bio", "hello".to_string()));
        assert_eq!(f.bio, "hello");
        assert!(!MatchWorkflow::set_field(&mut f, "topic", "x".to_string()));
    }
}
