//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PRIVRANK_*)
//! 2. TOML config file (if PRIVRANK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PRIVRANK_*)
/// 2. TOML config file (if PRIVRANK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the remote completion endpoint.
    ///
    /// Set via PRIVRANK_API_KEY environment variable.
    /// Required only when an analysis is actually requested.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the completion API.
    ///
    /// Set via PRIVRANK_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with each completion request.
    ///
    /// Set via PRIVRANK_MODEL environment variable.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for the completion request.
    ///
    /// Set via PRIVRANK_TEMPERATURE environment variable.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Max-token bound for the completion response.
    ///
    /// Set via PRIVRANK_MAX_TOKENS environment variable.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Analysis timeout in milliseconds. The remote call races this bound.
    ///
    /// Set via PRIVRANK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Time-to-live for cached ratings, in milliseconds.
    ///
    /// Set via PRIVRANK_CACHE_TTL_MS environment variable.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: i64,

    /// Maximum number of hosts kept in the rating cache.
    ///
    /// Set via PRIVRANK_CACHE_MAX_ENTRIES environment variable.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Character cap for the fallback excerpt when no policy text is found.
    ///
    /// Set via PRIVRANK_FALLBACK_CHARS environment variable.
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,

    /// Path to the SQLite store backing the rating cache.
    ///
    /// Set via PRIVRANK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via PRIVRANK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via PRIVRANK_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_max_tokens() -> u32 {
    700
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_cache_ttl_ms() -> i64 {
    86_400_000 // 24h
}

fn default_cache_max_entries() -> usize {
    50
}

fn default_fallback_chars() -> usize {
    4000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./privrank-cache.sqlite")
}

fn default_user_agent() -> String {
    "privrank/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_ms: default_cache_ttl_ms(),
            cache_max_entries: default_cache_max_entries(),
            fallback_chars: default_fallback_chars(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Analysis timeout as Duration for use with tokio timers.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `PRIVRANK_`
    /// 2. TOML file from `PRIVRANK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PRIVRANK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("PRIVRANK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API key is not set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "api_key".into(),
            hint: "Set PRIVRANK_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.cache_ttl_ms, 86_400_000);
        assert_eq!(config.cache_max_entries, 50);
        assert_eq!(config.fallback_chars, 4000);
        assert_eq!(config.db_path, PathBuf::from("./privrank-cache.sqlite"));
        assert_eq!(config.user_agent, "privrank/0.1");
        assert_eq!(config.max_bytes, 5_242_880);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_key_present() {
        let config = AppConfig { api_key: Some("test-key".into()), ..Default::default() };
        let result = config.require_api_key();
        assert_eq!(result.unwrap(), "test-key");
    }
}
