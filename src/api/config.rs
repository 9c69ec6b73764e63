//! Service configuration.
//!
//! Bind address and CORS allow-list are the only deployment-time knobs.
//! Everything else about a request is self-contained, so there is no
//! further runtime configuration.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
    /// Origins allowed by CORS. A single `"*"` entry allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 8000).into(),
            // Local frontend dev servers (Vite, CRA).
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Creates a config with a custom port.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_origins.is_empty() {
            return Err(ConfigError::NoOrigins);
        }
        if self.allowed_origins.iter().any(|o| o.is_empty()) {
            return Err(ConfigError::EmptyOrigin);
        }
        if self.allowed_origins.iter().any(|o| o == "*") && self.allowed_origins.len() > 1 {
            return Err(ConfigError::MixedWildcard);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("allowed_origins must not be empty")]
    NoOrigins,
    #[error("allowed_origins entries must not be empty strings")]
    EmptyOrigin,
    #[error("wildcard origin \"*\" must be the only allowed_origins entry")]
    MixedWildcard,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.server.validate()?;
        Ok(config)
    }
}
