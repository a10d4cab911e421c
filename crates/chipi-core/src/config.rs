//! Configuration system for chipi.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ChipiError, ChipiResult};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;
/// Default listen host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default backing document, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "training_data.json";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipiConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Path of the JSON training data document.
    pub data_file: PathBuf,
}

impl Default for ChipiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ChipiConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ChipiResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ChipiError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ChipiError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| ChipiError::Configuration(e.to_string())),
            _ => Err(ChipiError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> ChipiResult<Self> {
        Self::default().merge_env()
    }

    /// Override fields from `CHIPI_HOST`, `CHIPI_PORT` and `CHIPI_DATA_FILE`.
    pub fn merge_env(mut self) -> ChipiResult<Self> {
        if let Ok(host) = std::env::var("CHIPI_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("CHIPI_PORT") {
            self.port = port.parse().map_err(|_| {
                ChipiError::Configuration(format!(
                    "CHIPI_PORT must be a valid port number, got '{}'",
                    port
                ))
            })?;
        }
        if let Ok(path) = std::env::var("CHIPI_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        Ok(self)
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ChipiConfigBuilder {
        ChipiConfigBuilder::default()
    }
}

/// Builder for ChipiConfig.
#[derive(Default)]
pub struct ChipiConfigBuilder {
    config: ChipiConfig,
}

impl ChipiConfigBuilder {
    /// Set listen host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set training data document path.
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ChipiConfig {
        self.config
    }
}
