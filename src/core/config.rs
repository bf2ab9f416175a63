//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default crawl4ai deployment address (the port the official docker image
/// listens on).
const DEFAULT_CRAWL4AI_URL: &str = "http://127.0.0.1:11235";

/// Default request timeout in seconds. Crawls that render JavaScript or run
/// LLM filters can take a while, so this is deliberately generous.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// crawl4ai API connection configuration.
    pub crawler: CrawlerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Connection settings for the remote crawl4ai service.
#[derive(Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the crawl4ai deployment.
    pub base_url: String,

    /// Optional bearer token, required when the deployment enables auth.
    pub api_token: Option<String>,

    /// Request timeout in seconds. Bounds every API call so a hung crawl
    /// cannot block the server indefinitely.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CrawlerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlerConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CRAWL4AI_URL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "crawl4ai-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            crawler: CrawlerConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_CRAWL4AI_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("MCP_CRAWL4AI_URL") {
            config.crawler.base_url = base_url;
        }

        if let Ok(token) = std::env::var("MCP_CRAWL4AI_API_TOKEN") {
            config.crawler.api_token = Some(token);
            info!("crawl4ai API token loaded from environment");
        } else {
            warn!(
                "MCP_CRAWL4AI_API_TOKEN not set - requests will be sent without \
                 authentication. Set it if your crawl4ai deployment requires a token."
            );
        }

        if let Ok(timeout) = std::env::var("MCP_CRAWL4AI_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.crawler.timeout_secs = secs,
                Err(_) => warn!(
                    "Invalid MCP_CRAWL4AI_TIMEOUT_SECS value '{}', keeping default of {}s",
                    timeout, config.crawler.timeout_secs
                ),
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

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
    fn test_crawler_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.base_url, DEFAULT_CRAWL4AI_URL);
        assert_eq!(config.crawler.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.crawler.api_token.is_none());
    }

    #[test]
    fn test_crawler_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CRAWL4AI_URL", "http://crawler.internal:8000");
            std::env::set_var("MCP_CRAWL4AI_API_TOKEN", "secret_token_123");
            std::env::set_var("MCP_CRAWL4AI_TIMEOUT_SECS", "15");
        }
        let config = Config::from_env();
        assert_eq!(config.crawler.base_url, "http://crawler.internal:8000");
        assert_eq!(config.crawler.api_token.as_deref(), Some("secret_token_123"));
        assert_eq!(config.crawler.timeout_secs, 15);
        unsafe {
            std::env::remove_var("MCP_CRAWL4AI_URL");
            std::env::remove_var("MCP_CRAWL4AI_API_TOKEN");
            std::env::remove_var("MCP_CRAWL4AI_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CRAWL4AI_TIMEOUT_SECS", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.crawler.timeout_secs, DEFAULT_TIMEOUT_SECS);
        unsafe {
            std::env::remove_var("MCP_CRAWL4AI_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_api_token_redacted_in_debug() {
        let crawler = CrawlerConfig {
            api_token: Some("super_secret_key".to_string()),
            ..CrawlerConfig::default()
        };
        let debug_str = format!("{:?}", crawler);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
