use anyhow::Result;
use clap::Parser;
use weather_core::{DEFAULT_BASE_URL, ProviderId, ProviderSettings, RunMode, ServerConfig};

/// Fully validated gateway configuration. Built once at startup, immutable
/// afterwards, passed explicitly into constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider_id: ProviderId,
    pub provider: ProviderSettings,
}

/// Command-line surface; every flag can also come from the environment.
#[derive(Debug, Parser)]
#[command(
    name = "weather-server",
    version,
    about = "HTTP gateway for current-weather lookups"
)]
pub struct Cli {
    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Run mode: debug, release or test
    #[arg(long, env = "SERVER_MODE", default_value = "debug")]
    pub mode: String,

    /// Weather data provider
    #[arg(long, env = "WEATHER_PROVIDER", default_value = "openweathermap")]
    pub provider: String,

    /// API key for the weather provider
    #[arg(long, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the provider's REST API
    #[arg(long, env = "WEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "WEATHER_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}

impl Cli {
    /// Resolve and validate the configuration. Any failure here is fatal
    /// for the process.
    pub fn into_config(self) -> Result<Config> {
        let mode: RunMode = self.mode.parse()?;

        let server = ServerConfig {
            host: self.host,
            port: self.port,
            mode,
        };
        server.validate()?;

        let provider_id = ProviderId::try_from(self.provider.as_str())?;

        let provider = ProviderSettings {
            api_key: self.api_key,
            base_url: self.base_url,
            timeout_secs: self.timeout,
        };
        provider.validate()?;

        Ok(Config { server, provider_id, provider })
    }
}
