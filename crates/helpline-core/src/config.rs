//! Configuration for the helpline client.
//!
//! The config lives in a small JSON file; the endpoint can additionally be
//! overridden by the `HELPLINE_ENDPOINT` environment variable or a CLI
//! flag, which take precedence in that order.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV_VAR: &str = "HELPLINE_ENDPOINT";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat service (scheme + authority).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Assistant greeting seeded into a fresh conversation. `None` starts
    /// the transcript empty.
    #[serde(default = "default_greeting")]
    pub greeting: Option<String>,

    /// Whether the transcript shows per-turn timestamps.
    #[serde(default = "default_show_timestamps")]
    pub show_timestamps: bool,
}

fn default_endpoint() -> String {
    // The reference backend listens on localhost:5000.
    "http://127.0.0.1:5000".into()
}

fn default_greeting() -> Option<String> {
    Some(
        "Hello! I am your customer support assistant. Ask me about orders, \
         returns, delivery, or products."
            .into(),
    )
}

fn default_show_timestamps() -> bool {
    true
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Resolve the effective endpoint.
    ///
    /// Precedence: explicit `flag` override, then [`ENDPOINT_ENV_VAR`],
    /// then the configured value.
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> String {
        if let Some(endpoint) = flag {
            return endpoint.trim_end_matches('/').to_string();
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.trim().is_empty() {
                return endpoint.trim_end_matches('/').to_string();
            }
        }
        self.endpoint.trim_end_matches('/').to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            greeting: default_greeting(),
            show_timestamps: default_show_timestamps(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
