//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable prefix for layered configuration.
pub const ENV_PREFIX: &str = "CWSTATS";

/// Fallback environment variable for the game API token.
pub const TOKEN_ENV: &str = "CR_API_TOKEN";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to load layered config: {0}")]
    LayerError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Game API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; usually supplied through the environment
    #[serde(default)]
    pub api_token: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.clashroyale.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("cwstats-api/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origin, `*` for any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Badge table overriding the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badges_path: Option<PathBuf>,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            badges_path: None,
            upstream: UpstreamConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional TOML file overlaid with
    /// `CWSTATS__*` environment variables (e.g. `CWSTATS__SERVER__PORT`).
    ///
    /// When no token is configured, `CR_API_TOKEN` is used.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let layered = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut config: AppConfig = layered.try_deserialize()?;
        if config.upstream.api_token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                config.upstream.api_token = token;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Upstream timeout must be greater than 0".to_string(),
            ));
        }

        if url::Url::parse(&self.upstream.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Upstream base URL is not a valid URL: {}",
                self.upstream.base_url
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
