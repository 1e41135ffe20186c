//! Service configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `weather.toml` (explicit path, or the first one found in the standard
//!    locations)
//! 3. environment variables, after `.env` has been read
//!
//! # Environment Variables
//! - `HOST`, `PORT`: bind address
//! - `OPENWEATHER_API_KEY`: upstream credential
//! - `OPENWEATHER_BASE_URL`: upstream base URL (tests, proxies)
//! - `HISTORY_SNAPSHOT_PATH`: history export to load at startup

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream weather provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Usually supplied through `OPENWEATHER_API_KEY` rather than the file.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_units")]
    pub units: String,
}

/// Historical store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// Records returned by the history views.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Records fed to the predictor.
    #[serde(default = "default_prediction_window")]
    pub prediction_window: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/history_snapshot.json")
}

fn default_history_window() -> usize {
    30
}

fn default_prediction_window() -> usize {
    7
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            units: default_units(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            history_window: default_history_window(),
            prediction_window: default_prediction_window(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the first `weather.toml` found, or defaults when none exists.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("weather.toml"),
            PathBuf::from("backend/weather.toml"),
            PathBuf::from("../weather.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Using config file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Full resolution: `.env`, file (explicit or default location), env.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_location()?,
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto the loaded values.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(key) = env::var("OPENWEATHER_API_KEY") {
            if !key.trim().is_empty() {
                self.upstream.api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(url) = env::var("OPENWEATHER_BASE_URL") {
            self.upstream.base_url = url;
        }
        if let Ok(path) = env::var("HISTORY_SNAPSHOT_PATH") {
            self.history.snapshot_path = PathBuf::from(path);
        }
        Ok(())
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
