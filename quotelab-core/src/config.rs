//! Pipeline configuration.
//!
//! Configuration is an explicit value passed in at construction time — the
//! pipeline never reads the environment on its own, so the same instance can
//! be tested under different configurations without process-level mutation.
//! The CLI is the place where a TOML file and the `QUOTELAB_TOKEN` variable
//! are folded into this value.
//!
//! TOML shape:
//!
//! ```toml
//! api_base_url = "http://api.tushare.pro"
//! token = "..."                               # optional; or QUOTELAB_TOKEN
//! lookback_days = 120
//! secondary_command = ["python3", "scripts/fetch_daily.py"]
//! request_timeout_secs = 30
//! max_retries = 3
//! retry_base_delay_ms = 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Endpoint of the primary (token-authenticated) provider.
    pub api_base_url: String,
    /// Primary-provider access token. Absent means the primary leg is
    /// skipped and the secondary provider carries the request.
    pub token: Option<String>,
    /// Trading-day lookback window for the resolved range.
    pub lookback_days: usize,
    /// Program plus arguments of the out-of-process secondary provider.
    /// Empty disables the secondary leg.
    pub secondary_command: Vec<String>,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://api.tushare.pro".into(),
            token: None,
            lookback_days: 120,
            secondary_command: Vec::new(),
            request_timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Fill the token from `QUOTELAB_TOKEN` when the config leaves it unset.
    pub fn with_env_token(mut self) -> Self {
        if self.token.is_none() {
            if let Ok(token) = std::env::var("QUOTELAB_TOKEN") {
                if !token.is_empty() {
                    self.token = Some(token);
                }
            }
        }
        self
    }
}
