//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the charge processor and the server configuration; both are
//! immutable after startup.

use relay_core::BoxedChargeProcessor;
use relay_yoco::YocoChargeClient;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Charge processor
    pub processor: BoxedChargeProcessor,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by the Yoco processor
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let yoco = YocoChargeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Yoco: {}", e))?;

        Ok(Self::with_processor(config, Arc::new(yoco)))
    }

    /// Create an AppState around an existing processor
    pub fn with_processor(config: AppConfig, processor: BoxedChargeProcessor) -> Self {
        Self { processor, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        assert!(config.is_production());
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = AppConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");

        let bad = AppConfig {
            host: "not a host".to_string(),
            ..config
        };
        assert!(bad.socket_addr().is_err());
    }
}
