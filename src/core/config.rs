//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Default Canvas API location (the client appends `/api/v1`).
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Canvas API location and credentials.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Canvas API auth context: where to send requests and which token to use.
///
/// A missing token is a valid state; every API call then fails with a
/// configuration error instead of reaching the network.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Canvas backend, without the version prefix.
    pub base_url: String,

    /// Bearer token for the `Authorization` header.
    pub token: Option<String>,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "canvas-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). The Canvas API is configured
    /// with `CANVAS_API_URL` and `CANVAS_API_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("CANVAS_API_URL") {
            config.api.base_url = url;
        }

        config.api.token = std::env::var("CANVAS_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_api_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("CANVAS_API_URL", "https://canvas.example.com");
            std::env::set_var("CANVAS_API_TOKEN", "tok_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.api.base_url, "https://canvas.example.com");
        assert_eq!(config.api.token.as_deref(), Some("tok_12345"));
        unsafe {
            std::env::remove_var("CANVAS_API_URL");
            std::env::remove_var("CANVAS_API_TOKEN");
        }
    }

    #[test]
    fn test_blank_token_is_absent() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("CANVAS_API_TOKEN", "   ");
        }
        let config = Config::from_env();
        assert!(config.api.token.is_none());
        unsafe {
            std::env::remove_var("CANVAS_API_TOKEN");
        }
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let api = ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            token: Some("super_secret_token".to_string()),
        };
        let debug_str = format!("{:?}", api);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_default_has_no_token() {
        let config = Config::default();
        assert!(config.api.token.is_none());
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }
}
