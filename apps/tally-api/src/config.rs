//! Tally API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Tally API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub bind_address: String,

    /// HTTP server port (default: 8000)
    pub http_port: u16,

    /// Directory served by the /files routes (default: ./files)
    pub files_dir: PathBuf,

    /// Create the files directory on startup if missing (default: true)
    pub create_files_dir: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),

            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            files_dir: lookup("FILES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./files")),

            create_files_dir: lookup("CREATE_FILES_DIR")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CREATE_FILES_DIR".to_string()))?,
        };

        if config.files_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("FILES_DIR".to_string()));
        }

        Ok(config)
    }

    /// The socket address to listen on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDRESS".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
