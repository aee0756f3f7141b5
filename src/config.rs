//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default pass creation endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/create";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_ENDPOINT: &str = "B2W_ENDPOINT";
const ENV_AUTH_TOKEN: &str = "B2W_AUTH_TOKEN";
const ENV_TIMEOUT_SECS: &str = "B2W_TIMEOUT_SECS";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "bank2wallet", "bank2wallet-tui")
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Pass creation endpoint
    pub endpoint: Option<String>,
    /// Value of the Authorization header
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for the pass service client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve settings from the process environment
    pub fn settings(&self) -> ServiceSettings {
        self.resolve(|key| std::env::var(key).ok())
    }

    /// Resolve settings, letting `env` lookups override file values
    pub fn resolve(&self, env: impl Fn(&str) -> Option<String>) -> ServiceSettings {
        let endpoint = env(ENV_ENDPOINT)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let auth_token = env(ENV_AUTH_TOKEN)
            .or_else(|| self.auth_token.clone())
            .filter(|token| !token.is_empty());

        let env_timeout = env(ENV_TIMEOUT_SECS).and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!("Ignoring {ENV_TIMEOUT_SECS}={raw:?}: not a number of seconds");
                None
            }
        });
        let timeout_secs = env_timeout
            .or(self.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        ServiceSettings {
            endpoint,
            auth_token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Path of the log file, when a data directory is available
pub fn log_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("bank2wallet-tui.log"))
}
