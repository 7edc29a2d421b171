//! Research dataset discovery workflow.

pub mod model;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::DATASET_DISCOVERY_ID;
use crate::sample;
use crate::workflow::{Workflow, WorkflowKind};
pub use model::{DatasetItem, DatasetResult, SearchMetadata};

pub const DOMAIN_OPTIONS: &[&str] = &[
    "Computer Science",
    "Physics",
    "Biology",
    "Mathematics",
    "Economics",
    "Medicine",
    "Engineering",
    "Other",
];

pub const DATA_TYPE_OPTIONS: &[&str] = &["All Types", "Dataset", "Paper", "Survey", "Benchmark"];

/// Data type value that adds no filter to the prompt.
pub const ALL_TYPES: &str = "All Types";

/// Research query submitted for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchForm {
    pub topic: String,
    pub domain: String,
    pub data_type: String,
    pub year_from: String,
    pub year_to: String,
}

impl Default for ResearchForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            domain: DOMAIN_OPTIONS[0].to_string(),
            data_type: ALL_TYPES.to_string(),
            year_from: String::new(),
            year_to: String::new(),
        }
    }
}

/// Build the discovery prompt for a research query.
pub fn build_prompt(form: &ResearchForm) -> String {
    let mut message = format!(
        "Discover relevant datasets for:\nResearch Topic: {}\nDomain: {}",
        form.topic, form.domain
    );

    if form.data_type != ALL_TYPES {
        message.push_str(&format!("\nData Type: {}", form.data_type));
    }

    if !form.year_from.is_empty() || !form.year_to.is_empty() {
        let from = if form.year_from.is_empty() { "any" } else { form.year_from.as_str() };
        let to = if form.year_to.is_empty() { "present" } else { form.year_to.as_str() };
        message.push_str(&format!("\nYear Range: {} - {}", from, to));
    }

    message
}

/// Marker for the discovery workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryWorkflow;

impl Workflow for DiscoveryWorkflow {
    type Form = ResearchForm;
    type Output = DatasetResult;

    const KIND: WorkflowKind = WorkflowKind::Discover;
    const AGENT_ID: &'static str = DATASET_DISCOVERY_ID;
    const FAILURE_FALLBACK: &'static str = "An error occurred while discovering datasets. Please try again.";
    const REQUIRED_FIELDS: &'static [&'static str] = &["topic"];

    fn field<'a>(form: &'a ResearchForm, name: &str) -> Option<&'a str> {
        match name {
            "topic" => Some(&form.topic),
            "domain" => Some(&form.domain),
            "data_type" => Some(&form.data_type),
            "year_from" => Some(&form.year_from),
            "year_to" => Some(&form.year_to),
            _ => None,
        }
    }

    fn set_field(form: &mut ResearchForm, name: &str, value: String) -> bool {
        let slot = match name {
            "topic" => &mut form.topic,
            "domain" => &mut form.domain,
            "data_type" => &mut form.data_type,
            "year_from" => &mut form.year_from,
            "year_to" => &mut form.year_to,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn prompt(form: &ResearchForm) -> String {
        build_prompt(form)
    }

    fn decode(normalized: Value) -> Option<DatasetResult> {
        DatasetResult::from_normalized(normalized)
    }

    fn sample_form() -> ResearchForm {
        sample::research_form()
    }

    fn sample_output() -> DatasetResult {
        sample::dataset_result()
    }

    fn item_count(output: &DatasetResult) -> usize {
        output.datasets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(topic: &str) -> ResearchForm {
        ResearchForm { topic: topic.to_string(), ..ResearchForm::default() }
    }

    #[test]
    fn test_minimal_prompt() {
        assert_eq!(
            build_prompt(&form("Graph neural networks")),
            "Discover relevant datasets for:\nResearch Topic: Graph neural networks\nDomain: Computer Science"
        );
    }

    #[test]
    fn test_prompt_with_filters() {
        let mut f = form("Protein folding");
        f.domain = "Biology".to_string();
        f.data_type = "Benchmark".to_string();
        f.year_from = "2019".to_string();

        let prompt = build_prompt(&f);
        assert!(prompt.contains("Domain: Biology"));
        assert!(prompt.ends_with("\nData Type: Benchmark\nYear Range: 2019 - present"));
    }

    #[test]
    fn test_prompt_with_upper_year_only() {
        let mut f = form("Climate models");
        f.year_to = "2022".to_string();
        assert!(build_prompt(&f).ends_with("Year Range: any - 2022"));
    }

    #[test]
    fn test_topic_required() {
        assert_eq!(DiscoveryWorkflow::validate(&form("   ")).fields(), vec!["topic"]);
        assert!(DiscoveryWorkflow::validate(&form("x")).is_empty());
    }
}
