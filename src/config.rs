//! Configuration System
//!
//! Loads the terminal dashboard and development backend settings from a
//! TOML file, then applies `PROSEL_*` environment overrides. Command line
//! flags are layered on top by the binaries.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::HttpClientConfig;
use crate::devapi::DevApiConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub devapi: DevApiSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote REST API the dashboard talks to
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means the transport default (no explicit timeout)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    HttpClientConfig::default().base_url
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Where the terminal front-end keeps the signed-in user
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("prosel").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.prosel_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Development backend bind address
#[derive(Debug, Clone, Deserialize)]
pub struct DevApiSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for DevApiSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("prosel").join("config.toml")),
            Some(PathBuf::from("/etc/prosel/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!(path = ?path, "Loaded config");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "Failed to load config");
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `PROSEL_*` overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PROSEL_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("PROSEL_REQUEST_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!(value = %secs, "Ignoring invalid PROSEL_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("PROSEL_SESSION_FILE") {
            self.session.path = path;
        }

        if let Some(host) = lookup("PROSEL_DEVAPI_HOST") {
            self.devapi.host = host;
        }
        if let Some(port) = lookup("PROSEL_DEVAPI_PORT") {
            if let Ok(p) = port.parse() {
                self.devapi.port = p;
            }
        }

        if let Some(level) = lookup("PROSEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PROSEL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the reqwest client
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.api.base_url.clone(),
            request_timeout: self.api.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn session_path(&self) -> PathBuf {
        PathBuf::from(&self.session.path)
    }

    pub fn devapi_config(&self) -> DevApiConfig {
        DevApiConfig {
            host: self.devapi.host.clone(),
            port: self.devapi.port,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Commented default config file, printed by `prosel config`
pub fn generate_default_config() -> String {
    r#"# Prosel Configuration
#
# Environment variables override these settings:
# - PROSEL_API_URL
# - PROSEL_REQUEST_TIMEOUT_SECS
# - PROSEL_SESSION_FILE
# - PROSEL_DEVAPI_HOST
# - PROSEL_DEVAPI_PORT
# - PROSEL_LOG_LEVEL
# - PROSEL_LOG_FORMAT

[api]
# Base URL of the hospital REST API
base_url = "http://localhost:3001/api"

# Per-request timeout in seconds (unset: no explicit timeout)
# request_timeout_secs = 10

[session]
# File holding the signed-in user record
# path = "~/.local/share/prosel/session.json"

[devapi]
# Development backend bind address
host = "0.0.0.0"
port = 3001

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
