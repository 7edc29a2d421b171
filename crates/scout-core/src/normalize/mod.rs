//! Response normalization.
//!
//! The agent platform does not fix the shape of its payload. The result
//! object we want may arrive as a native object, as a JSON string, as a
//! fenced block inside prose, one level up, at the top level, in a
//! `message` field or in `raw_response`. [`normalize`] tries each known
//! shape in a fixed priority order and stops at the first hit.

pub mod fence;

use serde_json::{json, Value};
use tracing::debug;

pub use fence::extract_fenced;

/// Keys that identify a result object.
const COLLECTION_KEYS: &[&str] = &["matches", "datasets"];

/// One extraction attempt over the raw envelope.
type Strategy = fn(&Value) -> Option<Value>;

/// Strategies in priority order. Structured objects are trusted over
/// strings that need parsing, and deeper nesting over looser shapes.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("inner_result_object", inner_result_object),
    ("inner_result_string", inner_result_string),
    ("response_collection", response_collection),
    ("top_level_collection", top_level_collection),
    ("response_message", response_message),
    ("raw_response", raw_response),
    ("inner_result_fallback", inner_result_fallback),
];

/// Extract a result value from an agent envelope.
///
/// Returns `None` when no strategy yields a usable value. The winning
/// value is not guaranteed to carry a collection key (the last strategy
/// passes through whatever `response.result` held); typed decoding
/// downstream decides whether it is a valid result.
pub fn normalize(envelope: &Value) -> Option<Value> {
    if !is_truthy(envelope) {
        return None;
    }

    for (name, strategy) in STRATEGIES {
        if let Some(value) = strategy(envelope) {
            debug!(strategy = *name, "Agent response normalized");
            return Some(value).filter(is_truthy);
        }
    }

    debug!("No normalization strategy matched");
    None
}

/// JavaScript-style truthiness, which is what "field is present" means
/// for payloads produced by the agent platform.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether `value` is an object exposing a recognizable collection key.
pub fn has_collection(value: &Value) -> bool {
    value.as_object().map_or(false, |obj| {
        COLLECTION_KEYS
            .iter()
            .any(|key| obj.get(*key).map_or(false, is_truthy))
    })
}

fn inner_result(envelope: &Value) -> Option<&Value> {
    envelope.get("response")?.get("result")
}

fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn inner_result_object(envelope: &Value) -> Option<Value> {
    inner_result(envelope)
        .filter(|r| r.is_object() && has_collection(r))
        .cloned()
}

fn inner_result_string(envelope: &Value) -> Option<Value> {
    let text = inner_result(envelope)?.as_str()?;
    parse_json(text).or_else(|| extract_fenced(text).and_then(parse_json))
}

fn response_collection(envelope: &Value) -> Option<Value> {
    envelope.get("response").filter(|r| has_collection(r)).cloned()
}

fn top_level_collection(envelope: &Value) -> Option<Value> {
    Some(envelope).filter(|e| has_collection(e)).cloned()
}

fn response_message(envelope: &Value) -> Option<Value> {
    let text = envelope.get("response")?.get("message")?.as_str()?;
    parse_json(text)
}

fn raw_response(envelope: &Value) -> Option<Value> {
    let text = envelope.get("raw_response")?.as_str()?;
    let parsed = parse_json(text)?;
    // The rewrapped envelope has no raw_response, so this recurses once.
    let rewrapped = json!({ "response": { "result": parsed } });
    Some(normalize(&rewrapped).unwrap_or(Value::Null))
}

fn inner_result_fallback(envelope: &Value) -> Option<Value> {
    inner_result(envelope).filter(|r| is_truthy(r)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_payload() -> Value {
        json!({
            "matches": [{ "name": "Ada", "compatibility_score": 90 }],
            "intent_summary": "collaborators",
            "total_matches": 1
        })
    }

    #[test]
    fn test_inner_object_is_identity() {
        let payload = match_payload();
        let envelope = json!({ "success": true, "response": { "result": payload.clone() } });
        assert_eq!(normalize(&envelope), Some(payload));

        let datasets = json!({ "datasets": [], "total_results": 0 });
        let envelope = json!({ "response": { "result": datasets.clone() } });
        assert_eq!(normalize(&envelope), Some(datasets));
    }

    #[test]
    fn test_json_string_equals_native_object() {
        let payload = match_payload();
        let native = json!({ "response": { "result": payload.clone() } });
        let encoded = json!({ "response": { "result": payload.to_string() } });
        assert_eq!(normalize(&native), normalize(&encoded));
    }

    #[test]
    fn test_fenced_block_in_prose() {
        let payload = match_payload();
        let text = format!(
            "Sure! Here are the results:\n\n```json\n{}\n```\n\nLet me know if you need more.",
            serde_json::to_string_pretty(&payload).unwrap()
        );
        let envelope = json!({ "response": { "result": text } });
        assert_eq!(normalize(&envelope), Some(payload));
    }

    #[test]
    fn test_fenced_block_without_tag_and_padding() {
        let payload = json!({ "datasets": [{ "title": "CIFAR" }] });
        let text = format!("   ```   \n{}\n   ```   ", payload);
        let envelope = json!({ "response": { "result": text } });
        assert_eq!(normalize(&envelope), Some(payload));
    }

    #[test]
    fn test_response_level_collection() {
        let envelope = json!({ "response": { "datasets": [], "status": "ok" } });
        assert_eq!(normalize(&envelope), Some(json!({ "datasets": [], "status": "ok" })));
    }

    #[test]
    fn test_top_level_collection() {
        let envelope = json!({ "success": true, "matches": [{ "name": "Grace" }] });
        assert_eq!(normalize(&envelope), Some(envelope.clone()));
    }

    #[test]
    fn test_message_field() {
        let envelope = json!({ "response": { "message": "{\"matches\": []}" } });
        assert_eq!(normalize(&envelope), Some(json!({ "matches": [] })));
    }

    #[test]
    fn test_raw_response_recurses() {
        let payload = match_payload();
        let envelope = json!({ "success": true, "raw_response": payload.to_string() });
        assert_eq!(normalize(&envelope), Some(payload));

        let nested = json!({ "response": { "result": "{\"datasets\": [1]}" } }).to_string();
        let envelope = json!({ "raw_response": nested.clone() });
        // raw_response holds a whole envelope; it becomes the inner result
        // and passes through the fallback unchanged
        assert_eq!(
            normalize(&envelope),
            Some(json!({ "response": { "result": "{\"datasets\": [1]}" } }))
        );
    }

    #[test]
    fn test_inner_object_wins_over_top_level() {
        let inner = json!({ "matches": [{ "name": "inner" }] });
        let envelope = json!({ "matches": [{ "name": "outer" }], "response": { "result": inner.clone() } });
        assert_eq!(normalize(&envelope), Some(inner));
    }

    #[test]
    fn test_fallback_passes_through_unrecognized_object() {
        let odd = json!({ "answer": "no structure" });
        let envelope = json!({ "response": { "result": odd.clone() } });
        assert_eq!(normalize(&envelope), Some(odd));
    }

    #[test]
    fn test_unrecognized_shapes_yield_none() {
        assert_eq!(normalize(&Value::Null), None);
        assert_eq!(normalize(&json!({})), None);
        assert_eq!(normalize(&json!({ "success": true, "response": {} })), None);
        assert_eq!(normalize(&json!({ "response": { "result": "" } })), None);
        assert_eq!(normalize(&json!({ "response": { "message": "not json" } })), None);
        assert_eq!(normalize(&json!({ "raw_response": "{broken" })), None);
        assert_eq!(normalize(&json!({ "matches": null, "datasets": false })), None);
    }

    #[test]
    fn test_parsed_null_is_definite_failure() {
        let envelope = json!({ "response": { "result": "null" }, "matches": [1] });
        assert_eq!(normalize(&envelope), None);
    }

    #[test]
    fn test_array_result_is_not_treated_as_object() {
        let envelope = json!({ "response": { "result": [{ "matches": [] }] } });
        // no collection match, falls through to the pass-through
        assert_eq!(normalize(&envelope), Some(json!([{ "matches": [] }])));
    }

    #[test]
    fn test_unparseable_string_passes_through() {
        let envelope = json!({ "response": { "result": "I could not find anyone." } });
        assert_eq!(normalize(&envelope), Some(json!("I could not find anyone.")));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(0.5)));
    }
}
