//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a default, so the demo runs with an empty environment.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTWHEEL_CATALOG_URL` - Base URL of the public catalog API (default: <https://dummyjson.com>)
//! - `CARTWHEEL_STORAGE_PATH` - Path of the on-device key-value store file (default: cartwheel-store.json)
//! - `CARTWHEEL_HTTP_TIMEOUT_SECS` - Overall timeout for catalog requests in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";
const DEFAULT_STORAGE_PATH: &str = "cartwheel-store.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the public catalog API
    pub catalog_url: Url,
    /// Path of the on-device key-value store file
    pub storage_path: PathBuf,
    /// Overall timeout for catalog HTTP requests
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = parse_catalog_url(&get_env_or_default(
            "CARTWHEEL_CATALOG_URL",
            DEFAULT_CATALOG_URL,
        ))?;
        let storage_path = PathBuf::from(get_env_or_default(
            "CARTWHEEL_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));
        let http_timeout = parse_timeout_secs(&get_env_or_default(
            "CARTWHEEL_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        ))?;

        Ok(Self {
            catalog_url,
            storage_path,
            http_timeout,
        })
    }
}

impl Default for AppConfig {
    /// The zero-environment configuration: public catalog, local store file,
    /// 30-second request timeout.
    fn default() -> Self {
        Self {
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid"),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and sanity-check the catalog base URL.
fn parse_catalog_url(raw: &str) -> Result<Url, ConfigError> {
    let url = raw.parse::<Url>().map_err(|e| {
        ConfigError::InvalidEnvVar("CARTWHEEL_CATALOG_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "CARTWHEEL_CATALOG_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse the HTTP timeout from whole seconds.
fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw.parse::<u64>().map_err(|e| {
        ConfigError::InvalidEnvVar("CARTWHEEL_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "CARTWHEEL_HTTP_TIMEOUT_SECS".to_string(),
            "timeout must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_url_accepts_https() {
        let url = parse_catalog_url("https://dummyjson.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("dummyjson.com"));
    }

    #[test]
    fn test_parse_catalog_url_accepts_plain_http() {
        assert!(parse_catalog_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_parse_catalog_url_rejects_other_schemes() {
        let err = parse_catalog_url("ftp://dummyjson.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_catalog_url_rejects_garbage() {
        assert!(parse_catalog_url("not a url").is_err());
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.storage_path, PathBuf::from("cartwheel-store.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }
}
