//! HTTP client utilities for calling the VLM Run API.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{ConfigError, Error};

/// User agent sent with every outbound request.
pub const USER_AGENT: &str = concat!("vlmrun-mcp/", env!("CARGO_PKG_VERSION"));

/// Build the shared `reqwest::Client` for the given configuration.
///
/// The client keeps reqwest's default (unbounded) timeout unless
/// `config.timeout` is set.
pub fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| Error::from(ConfigError::invalid_value("HTTP client", e.to_string())))
}

/// Thin JSON-over-HTTP client bound to one configuration.
#[derive(Clone)]
pub struct JsonClient {
    http: reqwest::Client,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl JsonClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            http: build_client(config)?,
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// POST `body` as JSON to `endpoint` and decode the response as JSON.
    ///
    /// # Errors
    /// - `Error::Request` if no response was received
    /// - `Error::Timeout` if the configured timeout elapsed
    /// - `Error::Api` for a non-2xx status or a body that is not JSON
    #[instrument(level = "debug", skip_all, fields(endpoint = %endpoint))]
    pub async fn post_json<B>(&self, endpoint: &str, body: &B) -> Result<serde_json::Value, Error>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(body);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.send_error(endpoint, e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            };
            return Err(Error::api(endpoint, status.as_u16(), message));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.send_error(endpoint, e)
            } else {
                Error::api(endpoint, status.as_u16(), format!("Failed to parse response: {}", e))
            }
        })
    }

    fn send_error(&self, endpoint: &str, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            if let Some(timeout) = self.timeout {
                return Error::timeout(timeout.as_secs());
            }
        }
        Error::request(endpoint, describe_send_error(err))
    }
}

/// Render a send failure with its whole cause chain.
///
/// The URL is dropped since `Error::Request` already names the endpoint.
fn describe_send_error(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
