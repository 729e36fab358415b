//! MCP Resources for the VLM Run server.
//!
//! - `vlmrun://generation_types` - supported generation types with the
//!   endpoint each one calls and the response field it reads

use crate::handler::GenerationType;
use serde::Serialize;
use vlmrun_mcp_common::config::Config;

/// URI of the generation types resource.
pub const GENERATION_TYPES_URI: &str = "vlmrun://generation_types";

/// Description of one generation type.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationTypeInfo {
    /// Value to pass as `generation_type`
    pub id: &'static str,
    /// Endpoint the request is posted to
    pub endpoint: String,
    /// Response field reported back to the caller
    pub response_field: &'static str,
}

/// Describe every generation type against the configured base URL.
pub fn generation_types(config: &Config) -> Vec<GenerationTypeInfo> {
    GenerationType::ALL
        .iter()
        .map(|generation_type| GenerationTypeInfo {
            id: generation_type.as_str(),
            endpoint: config.api_url(generation_type.api_path()),
            response_field: generation_type.result_field(),
        })
        .collect()
}

/// Get the generation types resource as JSON.
pub fn generation_types_resource_json(config: &Config) -> String {
    serde_json::to_string_pretty(&generation_types(config)).unwrap_or_else(|_| "[]".to_string())
}
