//! HTTP client for the agent platform.
//!
//! POSTs `{message, agent_id, user_id, session_id}` as JSON and reads the
//! reply as an [`AgentEnvelope`]. Platform-level failures (non-2xx with a
//! readable body) come back as failed envelopes; only connection, timeout
//! and body-read errors are transport errors.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use scout_core::agent::{AgentEnvelope, AgentInvoker};
use scout_core::config::DEFAULT_TIMEOUT_SECS;
use scout_core::{ScoutConfig, ScoutError, ScoutResult};

/// Agent platform client.
#[derive(Clone)]
pub struct AgentClient {
    endpoint: String,
    api_key: Option<String>,
    user_id: String,
    session_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    message: &'a str,
    agent_id: &'a str,
    user_id: &'a str,
    session_id: &'a str,
}

impl AgentClient {
    /// Create a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            user_id: "scout".to_string(),
            session_id: Uuid::new_v4().to_string(),
            client,
        }
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &ScoutConfig) -> Self {
        let timeout = if config.timeout_secs == 0 { DEFAULT_TIMEOUT_SECS } else { config.timeout_secs };
        let mut client = Self::new(&config.agent_url, config.api_key.clone(), Duration::from_secs(timeout));
        client.user_id = config.user_id.clone();
        client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt to one agent.
    pub async fn call(&self, message: &str, agent_id: &str) -> Result<AgentEnvelope> {
        let request = InvokeRequest {
            message,
            agent_id,
            user_id: &self.user_id,
            session_id: &self.session_id,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        debug!(endpoint = %self.endpoint, agent_id, "Invoking agent");
        let response = builder
            .send()
            .await
            .context("Failed to connect to agent platform")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read agent platform response")?;

        debug!(status = %status, bytes = body.len(), "Agent platform responded");
        Ok(envelope_from_body(status, &body))
    }
}

/// Interpret a response body as an envelope.
fn envelope_from_body(status: reqwest::StatusCode, body: &str) -> AgentEnvelope {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut obj)) => {
            if !status.is_success() && !obj.contains_key("success") {
                let error = obj
                    .get("error")
                    .or_else(|| obj.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Agent API error ({})", status));
                obj.insert("success".to_string(), Value::Bool(false));
                obj.insert("error".to_string(), Value::String(error));
            }
            AgentEnvelope::from_value(Value::Object(obj))
        }
        _ if status.is_success() => {
            // Plain-text replies go where the normalizer looks for strings
            AgentEnvelope::succeeded(json!({ "result": body }))
        }
        _ => {
            warn!(status = %status, "Agent platform returned a non-JSON error body");
            AgentEnvelope::failed(format!("Agent API error ({}): {}", status, body.trim()))
        }
    }
}

#[async_trait]
impl AgentInvoker for AgentClient {
    async fn invoke(&self, message: &str, agent_id: &str) -> ScoutResult<AgentEnvelope> {
        self.call(message, agent_id)
            .await
            .map_err(|e| ScoutError::transport(format!("{:#}", e)))
    }
}
