//! Configuration structures.
//!
//! Configuration is loaded from a JSON config file and/or environment
//! variables. Environment values override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::errors::{Error, Result};

/// Environment variable naming the remote executor base URL.
pub const ENV_ENDPOINT: &str = "TOOLBRIDGE_ENDPOINT";
/// Environment variable carrying the executor API key.
pub const ENV_API_KEY: &str = "TOOLBRIDGE_API_KEY";
/// Environment variable with a humantime client timeout, e.g. `30s`.
pub const ENV_REQUEST_TIMEOUT: &str = "TOOLBRIDGE_REQUEST_TIMEOUT";

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Transport configuration.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Remote executor transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransportConfig {
    /// Executor base URL; `/tools/execute` is appended.
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token sent with every request (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// HTTP client timeout. Unset means the client waits indefinitely;
    /// the engine itself never enforces a deadline.
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config(format!("{}: {}", path.as_ref().display(), e)))
    }

    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto this configuration.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.transport.endpoint = endpoint;
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.transport.api_key = Some(api_key);
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            let timeout = humantime_serde::re::humantime::parse_duration(&raw)
                .map_err(|e| Error::config(format!("{}: {}", ENV_REQUEST_TIMEOUT, e)))?;
            self.transport.request_timeout = Some(timeout);
        }
        Ok(())
    }
}
