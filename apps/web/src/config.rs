//! Web server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `shopfront-web` starts a local dev server.

use std::env;
use std::path::PathBuf;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind the HTTP listener to.
    pub bind_address: String,

    /// HTTP port.
    pub port: u16,

    /// Path to the SQLite database file.
    pub database_path: PathBuf,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = WebConfig {
            bind_address: env::var("SHOPFRONT_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("SHOPFRONT_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SHOPFRONT_PORT".to_string()))?,

            database_path: env::var("SHOPFRONT_DB")
                .unwrap_or_else(|_| "shopfront.db".to_string())
                .into(),
        };

        Ok(config)
    }
}

impl Default for WebConfig {
    /// Defaults matching `load()` with no environment set. Used by
    /// integration tests, which pair this with an in-memory database.
    fn default() -> Self {
        WebConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("shopfront.db"),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }
}
