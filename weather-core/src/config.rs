use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Default base URL for the OpenWeatherMap current-weather API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Settings a provider adapter needs to reach its upstream API.
///
/// Read-only after startup; shared by reference with the adapter
/// constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.api_key.is_empty(), "provider API key must not be empty");
        ensure!(!self.base_url.is_empty(), "provider base URL must not be empty");
        ensure!(self.timeout_secs > 0, "provider timeout must be greater than 0");
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.host.is_empty(), "server host must not be empty");
        ensure!(self.port > 0, "server port must be in 1-65535");
        Ok(())
    }
}

/// Run mode; only drives the default log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Debug,
    Release,
    Test,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Debug => "debug",
            RunMode::Release => "release",
            RunMode::Test => "test",
        }
    }

    /// Default `tracing` filter directive when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            RunMode::Debug => "debug",
            RunMode::Release => "info",
            RunMode::Test => "warn",
        }
    }
}

impl FromStr for RunMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(RunMode::Debug),
            "release" => Ok(RunMode::Release),
            "test" => Ok(RunMode::Test),
            other => Err(anyhow::anyhow!(
                "unknown run mode '{other}', expected debug, release or test"
            )),
        }
    }
}
