//! # Yoco Configuration
//!
//! Configuration management for the Yoco integration.
//! Secrets are loaded from environment variables, falling back to
//! `config/yoco.toml` when `YOCO_SECRET_KEY` is not set.

use relay_core::{ChargeError, RelayResult};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;

/// Yoco charges endpoint
pub const DEFAULT_API_URL: &str = "https://payments.yoco.com/api/v1/charges";

/// Outbound call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONFIG_PATHS: [&str; 3] = [
    "config/yoco.toml",
    "../config/yoco.toml",
    "../../config/yoco.toml",
];

/// Yoco API configuration
#[derive(Clone)]
pub struct YocoConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Public key (pk_test_... or pk_live_...), only used for diagnostics
    pub public_key: Option<String>,

    /// Charges endpoint (overridable for testing/mocking)
    pub api_url: String,

    /// Outbound call timeout
    pub timeout: Duration,
}

/// On-disk form of the config
#[derive(Debug, Deserialize)]
struct FileConfig {
    secret_key: String,
    #[serde(default)]
    public_key: Option<String>,
    #[serde(default)]
    api_url: Option<String>,
}

impl YocoConfig {
    /// Load configuration from the environment, or from `config/yoco.toml`
    /// when `YOCO_SECRET_KEY` is absent.
    ///
    /// Env vars:
    /// - `YOCO_SECRET_KEY` (required unless the file is present)
    /// - `YOCO_PUBLIC_KEY`
    /// - `YOCO_API_URL`
    pub fn load() -> RelayResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        if env::var("YOCO_SECRET_KEY").is_ok() {
            return Self::from_lookup(|key| env::var(key).ok());
        }

        for path in CONFIG_PATHS {
            if let Ok(content) = std::fs::read_to_string(path) {
                tracing::info!("Loading Yoco config from {}", path);
                return Self::from_toml_str(&content);
            }
        }

        Err(ChargeError::Configuration(
            "YOCO_SECRET_KEY not set and no config/yoco.toml found".to_string(),
        ))
    }

    /// Build configuration from a variable lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> RelayResult<Self> {
        let secret_key = get("YOCO_SECRET_KEY").ok_or_else(|| {
            ChargeError::Configuration("YOCO_SECRET_KEY not set".to_string())
        })?;

        let config = Self {
            secret_key,
            public_key: get("YOCO_PUBLIC_KEY").filter(|k| !k.is_empty()),
            api_url: get("YOCO_API_URL")
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config document
    pub fn from_toml_str(content: &str) -> RelayResult<Self> {
        let file: FileConfig = toml::from_str(content).map_err(|e| {
            ChargeError::Configuration(format!("Failed to parse Yoco config: {}", e))
        })?;

        let config = Self {
            secret_key: file.secret_key,
            public_key: file.public_key,
            api_url: file.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with an explicit secret (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            public_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn validate(&self) -> RelayResult<()> {
        if !self.secret_key.starts_with("sk_test_") && !self.secret_key.starts_with("sk_live_") {
            return Err(ChargeError::Configuration(
                "YOCO_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if let Some(public_key) = &self.public_key {
            if !public_key.starts_with("pk_test_") && !public_key.starts_with("pk_live_") {
                return Err(ChargeError::Configuration(
                    "YOCO_PUBLIC_KEY must start with pk_test_ or pk_live_".to_string(),
                ));
            }
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ChargeError::Configuration(format!(
                "YOCO_API_URL is not an http(s) URL: {}",
                self.api_url
            )));
        }

        Ok(())
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom charges endpoint (for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder: set public key
    pub fn with_public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Builder: set outbound timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Secret stays out of logs
impl fmt::Debug for YocoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YocoConfig")
            .field("secret_key", &"[redacted]")
            .field("public_key", &self.public_key)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = YocoConfig::from_lookup(lookup(&[("YOCO_SECRET_KEY", "sk_test_abc123")]))
            .unwrap();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.public_key.is_none());
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = YocoConfig::from_lookup(lookup(&[
            ("YOCO_SECRET_KEY", "sk_live_abc123"),
            ("YOCO_PUBLIC_KEY", "pk_live_xyz789"),
            ("YOCO_API_URL", "http://localhost:9999/charges"),
        ]))
        .unwrap();

        assert!(config.is_live_mode());
        assert_eq!(config.public_key.as_deref(), Some("pk_live_xyz789"));
        assert_eq!(config.api_url, "http://localhost:9999/charges");
    }

    #[test]
    fn test_missing_secret() {
        let result = YocoConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ChargeError::Configuration(_))));
    }

    #[test]
    fn test_key_validation() {
        assert!(YocoConfig::from_lookup(lookup(&[("YOCO_SECRET_KEY", "abc")])).is_err());
        assert!(YocoConfig::from_lookup(lookup(&[
            ("YOCO_SECRET_KEY", "sk_test_abc"),
            ("YOCO_PUBLIC_KEY", "nope"),
        ]))
        .is_err());
        assert!(YocoConfig::from_lookup(lookup(&[
            ("YOCO_SECRET_KEY", "sk_test_abc"),
            ("YOCO_API_URL", "ftp://example.com"),
        ]))
        .is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = YocoConfig::from_toml_str(
            r#"
            secret_key = "sk_test_file"
            public_key = "pk_test_file"
            "#,
        )
        .unwrap();

        assert_eq!(config.secret_key, "sk_test_file");
        assert_eq!(config.public_key.as_deref(), Some("pk_test_file"));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        assert!(YocoConfig::from_toml_str("public_key = \"pk_test_x\"").is_err());
    }

    #[test]
    fn test_auth_header() {
        let config = YocoConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = YocoConfig::new("sk_live_supersecret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("[redacted]"));
    }
}
