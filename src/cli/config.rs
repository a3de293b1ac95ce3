//! Configuration file
//!
//! JSON file with three optional sections:
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 5000, "cors_origins": [] },
//!   "logging": { "level": "info", "format": "pretty" },
//!   "store": { "seed_sample_data": true }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;

/// Store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Load the sample catalogue on startup (default: true)
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

fn default_seed_sample_data() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {:?}: {}", path, e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        if let Some(bad) = self
            .server
            .cors_origins
            .iter()
            .find(|origin| origin.parse::<axum::http::HeaderValue>().is_err())
        {
            return Err(CliError::config_error(format!(
                "Invalid CORS origin: '{}'",
                bad
            )));
        }

        Ok(())
    }
}
