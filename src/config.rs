//! Configuration handling for the quote wizard

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default postal code (CEP) lookup service
pub const DEFAULT_POSTAL_LOOKUP_URL: &str = "https://viacep.com.br";
/// Default address search service
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the postal lookup base URL
const POSTAL_URL_ENV: &str = "MOVE_QUOTE_POSTAL_URL";
/// Environment variable overriding the geocoder base URL
const GEOCODER_URL_ENV: &str = "MOVE_QUOTE_GEOCODER_URL";

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuoteConfig {
    /// Postal code lookup base URL
    pub postal_lookup_url: Option<String>,
    /// Address search base URL
    pub geocoder_url: Option<String>,
    /// User-Agent header sent to both services
    pub user_agent: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl QuoteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "movequote", "move-quote")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: QuoteConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(POSTAL_URL_ENV).filter(|v| !v.is_empty()) {
            self.postal_lookup_url = Some(url);
        }
        if let Some(url) = lookup(GEOCODER_URL_ENV).filter(|v| !v.is_empty()) {
            self.geocoder_url = Some(url);
        }
    }

    pub fn postal_lookup_url(&self) -> &str {
        self.postal_lookup_url
            .as_deref()
            .unwrap_or(DEFAULT_POSTAL_LOOKUP_URL)
    }

    pub fn geocoder_url(&self) -> &str {
        self.geocoder_url.as_deref().unwrap_or(DEFAULT_GEOCODER_URL)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("move-quote/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = QuoteConfig::default();
        assert!(config.postal_lookup_url.is_none());
        assert!(config.geocoder_url.is_none());
        assert!(config.user_agent.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_defaults_through_accessors() {
        let config = QuoteConfig::default();
        assert_eq!(config.postal_lookup_url(), "https://viacep.com.br");
        assert_eq!(
            config.geocoder_url(),
            "https://nominatim.openstreetmap.org"
        );
        assert_eq!(config.request_timeout_secs(), 10);
        assert!(config.user_agent().starts_with("move-quote/"));
    }

    #[test]
    fn test_serialization() {
        let config = QuoteConfig {
            postal_lookup_url: Some("http://localhost:8080".to_string()),
            geocoder_url: Some("http://localhost:8081".to_string()),
            user_agent: Some("acme-moving/2.0".to_string()),
            request_timeout_secs: Some(3),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: QuoteConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.postal_lookup_url(), "http://localhost:8080");
        assert_eq!(parsed.geocoder_url(), "http://localhost:8081");
        assert_eq!(parsed.user_agent(), "acme-moving/2.0");
        assert_eq!(parsed.request_timeout_secs(), 3);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: QuoteConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.postal_lookup_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"request_timeout_secs": 4, "unknown_field": "value"}"#;
        let parsed: QuoteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.request_timeout_secs(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("move-quote-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"geocoder_url": "http://geo.local"}"#).unwrap();

        let config = QuoteConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.geocoder_url(), "http://geo.local");
        assert_eq!(config.postal_lookup_url(), DEFAULT_POSTAL_LOOKUP_URL);
    }

    #[test]
    fn test_load_from_invalid_file_fails() {
        let path = std::env::temp_dir().join(format!("move-quote-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "not json").unwrap();

        let result = QuoteConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MOVE_QUOTE_POSTAL_URL", "http://cep.test"),
            ("MOVE_QUOTE_GEOCODER_URL", ""),
        ]);
        let mut config = QuoteConfig {
            geocoder_url: Some("http://from-file".to_string()),
            ..Default::default()
        };

        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.postal_lookup_url(), "http://cep.test");
        // Empty variables are ignored
        assert_eq!(config.geocoder_url(), "http://from-file");
    }

    #[test]
    fn test_load_returns_ok() {
        // Result depends on the machine's config dir, but must not fail without a file
        let result = QuoteConfig::load();
        assert!(result.is_ok());
    }
}
