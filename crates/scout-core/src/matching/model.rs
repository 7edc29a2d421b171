//! Match result models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode;

/// One recommended contact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchItem {
    #[serde(default, deserialize_with = "decode::text")]
    pub name: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub title_or_role: String,
    #[serde(default, deserialize_with = "decode::score")]
    pub compatibility_score: u8,
    #[serde(default, deserialize_with = "decode::text")]
    pub reasoning: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub contextual_summary: String,
    #[serde(default, deserialize_with = "decode::text_list")]
    pub shared_interests: Vec<String>,
    #[serde(default, deserialize_with = "decode::text_list")]
    pub next_steps: Vec<String>,
    #[serde(default, deserialize_with = "decode::text")]
    pub confidence_level: String,
}

/// Output of the match orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, deserialize_with = "match_list")]
    pub matches: Vec<MatchItem>,
    #[serde(default, deserialize_with = "decode::text")]
    pub intent_summary: String,
    #[serde(default, deserialize_with = "decode::text")]
    pub overall_analysis: String,
    #[serde(default, deserialize_with = "decode::count")]
    pub total_matches: u32,
}

impl MatchResult {
    /// Decode a normalized agent value. Only JSON objects are accepted.
    pub fn from_normalized(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Keep object entries of a `matches` array; anything else is skipped.
fn match_list<'de, D>(deserializer: D) -> Result<Vec<MatchItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(object_items(Value::deserialize(deserializer)?))
}

pub(crate) fn object_items<T>(value: Value) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
