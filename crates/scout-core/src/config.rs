//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional `scout.toml`,
//! then `SCOUT_*` environment variables. The CLI applies its own flags
//! on top of the loaded value.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ScoutError, ScoutResult};

/// Default agent endpoint.
pub const DEFAULT_AGENT_URL: &str = "http://127.0.0.1:8787/api/agent";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "scout.toml";

/// Scout runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub agent_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub user_id: String,
    pub sample_mode: bool,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            agent_url: DEFAULT_AGENT_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_id: "scout".to_string(),
            sample_mode: false,
        }
    }
}

impl ScoutConfig {
    /// Load configuration from `path` (when it exists) and the process environment.
    pub fn load(path: Option<&Path>) -> ScoutResult<Self> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> ScoutResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ScoutError::config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Overlay `SCOUT_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> ScoutResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SCOUT_AGENT_URL") {
            self.agent_url = url;
        }
        if let Some(key) = lookup("SCOUT_API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(secs) = lookup("SCOUT_TIMEOUT_SECS") {
            self.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| ScoutError::config(format!("SCOUT_TIMEOUT_SECS is not a number: {}", secs)))?;
        }
        if let Some(user) = lookup("SCOUT_USER_ID") {
            self.user_id = user;
        }
        if let Some(flag) = lookup("SCOUT_SAMPLE_MODE") {
            self.sample_mode = parse_flag(&flag)
                .ok_or_else(|| ScoutError::config(format!("SCOUT_SAMPLE_MODE is not a boolean: {}", flag)))?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
