use std::net::SocketAddr;
use std::time::Duration;

use config::{Config, File};
use serde::Deserialize;

use crate::application::services::AverageBasis;

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid server address {host}:{port}")]
    InvalidAddress { host: String, port: u16 },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub polling: PollingSettings,
    pub stats: StatsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| SettingsError::InvalidAddress {
                host: self.host.clone(),
                port: self.port,
            })
    }
}

/// Where the batch scheduler API lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5454".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub logs_interval_seconds: u64,
    pub jobs_refresh_interval_seconds: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            logs_interval_seconds: 10,
            jobs_refresh_interval_seconds: 5,
        }
    }
}

impl PollingSettings {
    pub fn logs_interval(&self) -> Duration {
        Duration::from_secs(self.logs_interval_seconds)
    }

    pub fn jobs_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.jobs_refresh_interval_seconds)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    pub average_basis: AverageBasis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,batchdash=debug,tower_http=debug".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layers the optional `appsettings.<env>.toml` file under `APP_`
    /// prefixed environment variables (`APP_UPSTREAM__BASE_URL=...`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
