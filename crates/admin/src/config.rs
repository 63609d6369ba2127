//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LOJA_API_BASE_URL` - Demo API base URL (default: `https://fakestoreapi.com`)
//! - `LOJA_PRODUCTS_LIMIT` - Only fetch this many products (`?limit=N`, 0 for all)
//! - `LOJA_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `LOJA_DATA_DIR` - Directory for local collections (default: `.loja`)
//! - `LOJA_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://fakestoreapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DATA_DIR: &str = ".loja";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}")),
        }
    }
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Demo API configuration
    pub remote: RemoteConfig,
    /// Directory holding the local collections
    pub data_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// Demo API configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL the `/products` and `/users` paths are resolved against
    pub base_url: Url,
    /// Optional cap on the number of products fetched
    pub products_limit: Option<u32>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Configuration pointing at `base_url` with default limits.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            products_limit: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = get_env_or_default(&lookup, "LOJA_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = Url::parse(&base_url)
            .map_err(|e| invalid("LOJA_API_BASE_URL", &e))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "LOJA_API_BASE_URL".to_string(),
                format!("unsupported scheme: {}", base_url.scheme()),
            ));
        }

        // Zero means no limit
        let products_limit = get_optional_parsed::<u32, _>(&lookup, "LOJA_PRODUCTS_LIMIT")?
            .filter(|&limit| limit > 0);
        let timeout_secs = get_optional_parsed::<u64, _>(&lookup, "LOJA_HTTP_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let data_dir = PathBuf::from(get_env_or_default(&lookup, "LOJA_DATA_DIR", DEFAULT_DATA_DIR));
        let log_format = get_optional_parsed::<LogFormat, _>(&lookup, "LOJA_LOG_FORMAT")?
            .unwrap_or_default();

        Ok(Self {
            remote: RemoteConfig {
                base_url,
                products_limit,
                timeout: Duration::from_secs(timeout_secs),
            },
            data_dir,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get an optional environment variable and parse it.
fn get_optional_parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| invalid(key, &e)))
        .transpose()
}
