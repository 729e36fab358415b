//! Generation handler for the VLM Run MCP server.
//!
//! This module provides the `VlmRunHandler` struct and the parameter types for
//! prompt-driven image and document generation through the VLM Run API.
//!
//! A call never fails past this module: validation problems and API failures
//! are both turned into a human-readable message by [`ToolOutcome::message`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};
use vlmrun_mcp_common::config::Config;
use vlmrun_mcp_common::error::Error;
use vlmrun_mcp_common::http::JsonClient;

/// Placeholder used when the API response lacks the expected field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Prefix of every message reporting a failed API call.
pub const API_ERROR_PREFIX: &str = "Error occurred while calling VLM Run API";

/// What the VLM Run API should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    /// Image generation; the response carries `image_url`.
    Image,
    /// Document generation; the response carries `content`.
    Document,
}

impl GenerationType {
    /// Every supported generation type.
    pub const ALL: [GenerationType; 2] = [GenerationType::Image, GenerationType::Document];

    /// Parse a generation type, ignoring case.
    ///
    /// ```
    /// use vlmrun_mcp::handler::GenerationType;
    ///
    /// assert_eq!(GenerationType::parse("IMAGE"), Some(GenerationType::Image));
    /// assert_eq!(GenerationType::parse("video"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "image" => Some(GenerationType::Image),
            "document" => Some(GenerationType::Document),
            _ => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationType::Image => "image",
            GenerationType::Document => "document",
        }
    }

    /// API path relative to the configured base URL.
    pub fn api_path(&self) -> &'static str {
        match self {
            GenerationType::Image => "image/generate",
            GenerationType::Document => "document/generate",
        }
    }

    /// Response field holding the generated result.
    pub fn result_field(&self) -> &'static str {
        match self {
            GenerationType::Image => "image_url",
            GenerationType::Document => "content",
        }
    }

    fn success_label(&self) -> &'static str {
        match self {
            GenerationType::Image => "Image generated successfully. URL",
            GenerationType::Document => "Document generated successfully. Content",
        }
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ValidationError::InvalidGenerationType)
    }
}

/// Validation failures, detected before any network call.
///
/// The `Display` text is returned to the caller verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `prompt` or `generation_type` is missing or empty.
    #[error("Both prompt and generation_type are required.")]
    MissingParameters,
    /// `generation_type` is neither `image` nor `document`.
    #[error("Invalid generation_type. Must be 'image' or 'document'.")]
    InvalidGenerationType,
}

/// Parameters of the `vlm_run` tool.
///
/// Both fields are optional on the wire so that a missing value reaches
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct VlmRunParams {
    /// The prompt for image or document generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// The type of generation: 'image' or 'document' (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_type: Option<String>,
}

impl VlmRunParams {
    /// Create parameters with both fields present.
    pub fn new(prompt: impl Into<String>, generation_type: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            generation_type: Some(generation_type.into()),
        }
    }

    /// Validate the parameters.
    ///
    /// Presence is checked before the generation type, so a missing prompt
    /// with an unknown type reports `MissingParameters`.
    pub fn validate(&self) -> Result<GenerationRequest, ValidationError> {
        let prompt = self.prompt.as_deref().filter(|p| !p.is_empty());
        let generation_type = self.generation_type.as_deref().filter(|g| !g.is_empty());

        let (Some(prompt), Some(generation_type)) = (prompt, generation_type) else {
            return Err(ValidationError::MissingParameters);
        };

        Ok(GenerationRequest {
            prompt: prompt.to_string(),
            generation_type: generation_type.parse()?,
        })
    }
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Non-empty prompt.
    pub prompt: String,
    /// Normalized generation type.
    pub generation_type: GenerationType,
}

/// JSON body posted to the generation endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    prompt: &'a str,
}

/// Result of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Which endpoint produced the result.
    pub generation_type: GenerationType,
    /// The extracted result field, or `None` if absent from the response.
    pub value: Option<String>,
}

impl GenerationOutcome {
    /// Extract the result field for `generation_type` from a response body.
    ///
    /// Any body that is not an object, or an object without the field (or
    /// with a `null` value), yields `None`. An empty string is kept as is.
    /// Non-string values are kept in their JSON form.
    pub fn from_response(generation_type: GenerationType, body: &serde_json::Value) -> Self {
        let value = match body.get(generation_type.result_field()) {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self {
            generation_type,
            value,
        }
    }

    /// Human-readable success message.
    pub fn message(&self) -> String {
        format!(
            "{}: {}",
            self.generation_type.success_label(),
            self.value.as_deref().unwrap_or(NOT_AVAILABLE)
        )
    }
}

/// Final outcome of one tool invocation.
#[derive(Debug)]
pub enum ToolOutcome {
    /// The API call succeeded.
    Generated(GenerationOutcome),
    /// The input was rejected before any network call.
    Invalid(ValidationError),
    /// The API call failed.
    Failed(Error),
}

impl ToolOutcome {
    /// Whether the outcome reports a failure.
    pub fn is_error(&self) -> bool {
        !matches!(self, ToolOutcome::Generated(_))
    }

    /// The message returned to the caller.
    pub fn message(&self) -> String {
        match self {
            ToolOutcome::Generated(outcome) => outcome.message(),
            ToolOutcome::Invalid(err) => err.to_string(),
            ToolOutcome::Failed(err) => format!("{}: {}", API_ERROR_PREFIX, err),
        }
    }
}

/// VLM Run generation handler.
pub struct VlmRunHandler {
    /// Application configuration.
    pub config: Config,
    client: JsonClient,
}

impl VlmRunHandler {
    /// Create a new handler with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(level = "debug", name = "vlmrun_handler_new", skip_all)]
    pub fn new(config: Config) -> Result<Self, Error> {
        debug!(base_url = %config.base_url, "Initializing VlmRunHandler");
        let client = JsonClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// Full endpoint URL for a generation type.
    pub fn endpoint(&self, generation_type: GenerationType) -> String {
        self.config.api_url(generation_type.api_path())
    }

    /// Issue the generation request.
    ///
    /// # Errors
    /// Returns the transport error when the request fails, the API answers
    /// with a non-2xx status, or the body is not JSON.
    #[instrument(level = "info", name = "vlmrun_generate", skip_all, fields(generation_type = %request.generation_type))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, Error> {
        let endpoint = self.endpoint(request.generation_type);
        debug!(endpoint = %endpoint, prompt_len = request.prompt.len(), "Calling VLM Run API");

        let body = GenerateRequestBody {
            prompt: &request.prompt,
        };
        let response = self.client.post_json(&endpoint, &body).await?;

        let outcome = GenerationOutcome::from_response(request.generation_type, &response);
        if outcome.value.is_none() {
            warn!(
                field = request.generation_type.result_field(),
                "Response did not contain the expected field"
            );
        }
        Ok(outcome)
    }

    /// Validate, call the API and classify the result.
    pub async fn execute(&self, params: VlmRunParams) -> ToolOutcome {
        let request = match params.validate() {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Rejected vlm_run parameters");
                return ToolOutcome::Invalid(err);
            }
        };

        match self.generate(&request).await {
            Ok(outcome) => {
                info!(generation_type = %request.generation_type, "Generation succeeded");
                ToolOutcome::Generated(outcome)
            }
            Err(err) => {
                warn!(error = %err, "VLM Run API call failed");
                ToolOutcome::Failed(err)
            }
        }
    }

    /// Run the tool and return its message.
    pub async fn run(&self, params: VlmRunParams) -> String {
        self.execute(params).await.message()
    }
}
