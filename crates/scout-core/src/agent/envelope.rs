//! The success/failure wrapper returned by an agent invocation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Raw agent envelope.
///
/// Only `success` and `error` have a fixed meaning. Everything else is
/// kept as the original JSON so the normalizer can inspect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentEnvelope {
    raw: Value,
}

impl AgentEnvelope {
    /// Wrap a decoded response body.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Build a successful envelope around a response payload.
    pub fn succeeded(response: Value) -> Self {
        Self::from_value(json!({ "success": true, "response": response }))
    }

    /// Build a failed envelope carrying an error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::from_value(json!({ "success": false, "error": error.into() }))
    }

    /// Whether the agent platform reported success. Missing or non-boolean means no.
    pub fn success(&self) -> bool {
        self.raw.get("success").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Error text, when present and non-blank.
    pub fn error(&self) -> Option<&str> {
        self.raw
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// The full decoded body.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flag() {
        assert!(AgentEnvelope::succeeded(json!({})).success());
        assert!(!AgentEnvelope::failed("nope").success());
        assert!(!AgentEnvelope::from_value(json!({ "success": "true" })).success());
        assert!(!AgentEnvelope::from_value(Value::Null).success());
    }

    #[test]
    fn test_error_text() {
        assert_eq!(AgentEnvelope::failed("rate limited").error(), Some("rate limited"));
        assert_eq!(AgentEnvelope::failed("   ").error(), None);
        assert_eq!(AgentEnvelope::from_value(json!({ "error": 42 })).error(), None);
    }

    #[test]
    fn test_transparent_serde() {
        let body = json!({ "success": true, "response": { "result": "x" }, "raw_response": "y" });
        let envelope: AgentEnvelope = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(envelope.raw(), &body);
        assert_eq!(serde_json::to_value(&envelope).unwrap(), body);
    }
}
