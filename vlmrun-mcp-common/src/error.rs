//! Error types for the common library.
//!
//! This module provides a unified error hierarchy using `thiserror` for consistent
//! error handling across the VLM Run MCP crates.
//!
//! # Error Categories
//!
//! - `ConfigError`: Missing or invalid configuration
//! - `Error::Api`: VLM Run API errors (includes endpoint and status)
//! - `Error::Request`: Connection-level failures before a status was received
//! - `Error::Timeout`: Request timeouts

use thiserror::Error;

/// Unified error type for the common library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (invalid env values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// API errors with endpoint and HTTP status context
    ///
    /// Raised for non-2xx responses and for 2xx responses whose body is not JSON.
    #[error("API error for {endpoint} (HTTP {status_code}): {message}")]
    Api {
        /// The API endpoint that was called
        endpoint: String,
        /// HTTP status code returned by the API
        status_code: u16,
        /// Error message from the API or describing the failure
        message: String,
    },

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Request to {endpoint} failed: {message}")]
    Request {
        /// The API endpoint that was called
        endpoint: String,
        /// Description of the failure
        message: String,
    },

    /// Operation timeout errors
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

impl Error {
    /// Create a new API error with endpoint, status code, and message.
    ///
    /// # Example
    ///
    /// ```
    /// use vlmrun_mcp_common::error::Error;
    ///
    /// let err = Error::api(
    ///     "https://api.vlm.run/v1/image/generate",
    ///     500,
    ///     "Internal server error"
    /// );
    /// assert!(err.to_string().contains("api.vlm.run"));
    /// assert!(err.to_string().contains("500"));
    /// ```
    pub fn api(endpoint: impl Into<String>, status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            endpoint: endpoint.into(),
            status_code,
            message: message.into(),
        }
    }

    /// Create a new connection-level request error.
    pub fn request(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Request {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout(seconds: u64) -> Self {
        Error::Timeout(seconds)
    }

    /// HTTP status code attached to the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Configuration errors.
///
/// Every variable is optional; only a value that cannot be used is an error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
