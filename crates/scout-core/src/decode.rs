//! Lenient field decoders for agent-produced JSON.
//!
//! Used through `#[serde(deserialize_with = "...")]`. None of these fail:
//! a field of the wrong type decodes to its empty value so one bad field
//! never discards an otherwise usable result.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Upper bound of a score.
pub const MAX_SCORE: u8 = 100;

/// Text field: strings as-is, numbers and booleans stringified, anything else empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?))
}

/// List of strings: non-array becomes empty, non-string elements are
/// stringified when scalar and dropped otherwise.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}

/// Score in `0..=100`: floats are rounded, numeric strings parsed, out-of-range
/// values clamped, anything else 0.
pub fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = number_from_value(&Value::deserialize(deserializer)?).unwrap_or(0.0);
    Ok(raw.round().clamp(0.0, f64::from(MAX_SCORE)) as u8)
}

/// Non-negative count; anything unusable is 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = number_from_value(&Value::deserialize(deserializer)?).unwrap_or(0.0);
    Ok(raw.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

fn text_from_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Sample {
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "text_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "score")]
        score: u8,
        #[serde(default, deserialize_with = "count")]
        total: u32,
    }

    fn decode_sample(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default() {
        let p = decode_sample(json!({}));
        assert_eq!(p.label, "");
        assert!(p.tags.is_empty());
        assert_eq!(p.score, 0);
        assert_eq!(p.total, 0);
    }

    #[test]
    fn test_null_fields_default() {
        let p = decode_sample(json!({ "label": null, "tags": null, "score": null, "total": null }));
        assert_eq!(p.label, "");
        assert!(p.tags.is_empty());
        assert_eq!(p.score, 0);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(decode_sample(json!({ "label": 2024 })).label, "2024");
        assert_eq!(decode_sample(json!({ "label": ["a"] })).label, "");
    }

    #[test]
    fn test_list_coercion() {
        let p = decode_sample(json!({ "tags": ["NLP", 3, { "x": 1 }, null, "Ethics"] }));
        assert_eq!(p.tags, vec!["NLP", "3", "Ethics"]);
        assert!(decode_sample(json!({ "tags": "NLP" })).tags.is_empty());
    }

    #[test]
    fn test_score_coercion() {
        assert_eq!(decode_sample(json!({ "score": 87.6 })).score, 88);
        assert_eq!(decode_sample(json!({ "score": "72" })).score, 72);
        assert_eq!(decode_sample(json!({ "score": "85%" })).score, 85);
        assert_eq!(decode_sample(json!({ "score": 140 })).score, 100);
        assert_eq!(decode_sample(json!({ "score": -5 })).score, 0);
        assert_eq!(decode_sample(json!({ "score": "high" })).score, 0);
    }

    #[test]
    fn test_count_coercion() {
        assert_eq!(decode_sample(json!({ "total": 4 })).total, 4);
        assert_eq!(decode_sample(json!({ "total": "12" })).total, 12);
        assert_eq!(decode_sample(json!({ "total": -1 })).total, 0);
    }
}
