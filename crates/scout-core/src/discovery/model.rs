//! Dataset discovery result models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode;
use crate::matching::model::object_items;

/// One discovered resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetItem {
    #[serde(default, deserialize_with = "decode::text")]
    pub title: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub source: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub source_type: String,
    #[serde(default, deserialize_with = "decode::score")]
    pub relevance_score: u8,
    #[serde(default, deserialize_with = "decode::text")]
    pub contextual_summary: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub methodology_notes: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub access_link: String,
    #[serde(default, deserialize_with = "decode::text_list")]
    pub next_steps: Vec<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub year: String,
    #[serde(default, deserialize_with = "decode::text_list")]
    pub authors: Vec<String>,
}

/// How the agent ran the search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    #[serde(default, deserialize_with = "decode::text")]
    pub query_used: String,
    #[serde(default, deserialize_with = "decode::text_list")]
    pub sources_searched: Vec<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub filters_applied: String,
}

/// Output of the dataset discovery agent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetResult {
    #[serde(default, deserialize_with = "dataset_list")]
    pub datasets: Vec<DatasetItem>,
    #[serde(default, deserialize_with = "decode::text")]
    pub research_landscape_summary: String,
    #[serde(default, deserialize_with = "decode::count")]
    pub total_results: u32,
    #[serde(default, deserialize_with = "metadata")]
    pub search_metadata: SearchMetadata,
}

impl DatasetResult {
    /// Decode a normalized agent value. Only JSON objects are accepted.
    pub fn from_normalized(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Whether any search metadata is worth showing.
    pub fn has_metadata(&self) -> bool {
        let m = &self.search_metadata;
        !m.query_used.is_empty() || !m.sources_searched.is_empty() || !m.filters_applied.is_empty()
    }
}

fn dataset_list<'de, D>(deserializer: D) -> Result<Vec<DatasetItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(object_items(Value::deserialize(deserializer)?))
}

/// A non-object `search_metadata` decodes as empty metadata.
fn metadata<'de, D>(deserializer: D) -> Result<SearchMetadata, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(SearchMetadata::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_decode() {
        let value = json!({
            "datasets": [{
                "title": "CrossModal-3M",
                "source": "HuggingFace Datasets",
                "source_type": "Dataset",
                "relevance_score": 82,
                "access_link": "https://huggingface.co/datasets/example",
                "year": 2023,
                "authors": ["Thompson, L.", "Garcia, M."]
            }],
            "research_landscape_summary": "Rapidly evolving",
            "total_results": 1,
            "search_metadata": {
                "query_used": "multimodal transformers",
                "sources_searched": ["arXiv", "HuggingFace"],
                "filters_applied": "Domain: Computer Science"
            }
        });

        let result = DatasetResult::from_normalized(value).unwrap();
        let item = &result.datasets[0];
        assert_eq!(item.year, "2023");
        assert_eq!(item.relevance_score, 82);
        assert_eq!(item.methodology_notes, "");
        assert_eq!(result.search_metadata.sources_searched, vec!["arXiv", "HuggingFace"]);
        assert!(result.has_metadata());
    }

    #[test]
    fn test_missing_metadata() {
        let result = DatasetResult::from_normalized(json!({ "datasets": [] })).unwrap();
        assert_eq!(result.search_metadata, SearchMetadata::default());
        assert!(!result.has_metadata());
    }

    #[test]
    fn test_malformed_metadata() {
        let result = DatasetResult::from_normalized(json!({
            "datasets": [],
            "search_metadata": "arXiv only"
        }))
        .unwrap();
        assert!(!result.has_metadata());

        let result = DatasetResult::from_normalized(json!({
            "search_metadata": { "sources_searched": "arXiv", "query_used": "q" }
        }))
        .unwrap();
        assert!(result.search_metadata.sources_searched.is_empty());
        assert_eq!(result.search_metadata.query_used, "q");
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(DatasetResult::from_normalized(json!(42)).is_none());
    }
}
