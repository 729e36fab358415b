//! Configuration module for loading environment variables and settings.

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL for the VLM Run API.
pub const DEFAULT_BASE_URL: &str = "https://api.vlm.run/v1";

/// Default port for the HTTP transport.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the VLM Run API, without a trailing slash
    pub base_url: String,
    /// Optional API key sent as a bearer token
    pub api_key: Option<String>,
    /// Per-request timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `VLMRUN_BASE_URL` or
    /// `VLMRUN_TIMEOUT_SECS` is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("VLMRUN_BASE_URL") {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let api_key = lookup("VLMRUN_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let timeout = match lookup("VLMRUN_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout,
        })
    }

    /// Get the full URL for an API path relative to the base URL.
    ///
    /// ```
    /// use vlmrun_mcp_common::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(
    ///     config.api_url("image/generate"),
    ///     "https://api.vlm.run/v1/image/generate"
    /// );
    /// ```
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| {
            ConfigError::invalid_value(
                "VLMRUN_BASE_URL",
                format!("'{}' must start with http:// or https://", raw),
            )
        })?;

    if host.is_empty() {
        return Err(ConfigError::invalid_value("VLMRUN_BASE_URL", "missing host"));
    }
    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::invalid_value(
            "VLMRUN_TIMEOUT_SECS",
            format!("'{}' is not a positive number of seconds", raw),
        )),
    }
}
