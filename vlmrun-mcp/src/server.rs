//! MCP Server implementation for the VLM Run server.
//!
//! This module provides the MCP server handler that exposes:
//! - `vlm_run` tool for image or document generation from a prompt
//! - `vlmrun://generation_types` resource describing the supported types

use crate::handler::{VlmRunHandler, VlmRunParams};
use crate::resources;
use rmcp::{
    model::{
        CallToolResult, Content, JsonObject, ListResourcesResult, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo, Tool,
    },
    ErrorData as McpError, ServerHandler,
};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use vlmrun_mcp_common::config::Config;

/// Name the tool is registered under.
pub const TOOL_NAME: &str = "vlm_run";

/// Tool description shown to agents.
pub const TOOL_DESCRIPTION: &str =
    "This tool uses VLM Run's APIs to generate images or documents based on prompts.";

/// MCP Server for VLM Run generation.
#[derive(Clone)]
pub struct VlmRunServer {
    /// Handler, created on first tool call
    handler: Arc<OnceCell<VlmRunHandler>>,
    /// Server configuration
    config: Config,
}

impl VlmRunServer {
    /// Create a new VlmRunServer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            handler: Arc::new(OnceCell::new()),
            config,
        }
    }

    /// Server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn handler(&self) -> Result<&VlmRunHandler, McpError> {
        self.handler
            .get_or_try_init(|| async { VlmRunHandler::new(self.config.clone()) })
            .await
            .map_err(|e| McpError::internal_error(format!("Failed to initialize handler: {}", e), None))
    }

    /// Tools advertised by this server.
    pub fn tool_definitions() -> Vec<Tool> {
        use schemars::schema_for;

        let schema = schema_for!(VlmRunParams);
        let schema_value = serde_json::to_value(&schema).unwrap_or_default();
        let input_schema = match schema_value {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        vec![Tool {
            name: Cow::Borrowed(TOOL_NAME),
            description: Some(Cow::Borrowed(TOOL_DESCRIPTION)),
            input_schema,
            annotations: None,
            icons: None,
            meta: None,
            output_schema: None,
            title: None,
        }]
    }

    /// Resources advertised by this server.
    pub fn resource_definitions() -> Vec<rmcp::model::Resource> {
        vec![rmcp::model::Resource {
            raw: rmcp::model::RawResource {
                uri: resources::GENERATION_TYPES_URI.to_string(),
                name: "Generation Types".to_string(),
                title: None,
                description: Some(
                    "Supported generation types with their endpoints and response fields"
                        .to_string(),
                ),
                mime_type: Some("application/json".to_string()),
                size: None,
                icons: None,
                meta: None,
            },
            annotations: None,
        }]
    }

    /// Content of a resource, or `None` if the URI is unknown.
    pub fn resource_content(&self, uri: &str) -> Option<String> {
        match uri {
            resources::GENERATION_TYPES_URI => {
                Some(resources::generation_types_resource_json(&self.config))
            }
            _ => None,
        }
    }

    /// Run the `vlm_run` tool.
    ///
    /// Validation and API failures come back as an error tool result carrying
    /// the message, never as an MCP protocol error.
    pub async fn vlm_run(&self, params: VlmRunParams) -> Result<CallToolResult, McpError> {
        info!(generation_type = ?params.generation_type, "Running vlm_run");

        let handler = self.handler().await?;
        let outcome = handler.execute(params).await;
        let content = vec![Content::text(outcome.message())];

        if outcome.is_error() {
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }

    /// Dispatch a tool call by name.
    ///
    /// Missing arguments are treated as an empty object so that they are
    /// reported by validation.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        match name {
            TOOL_NAME => {
                let tool_params: VlmRunParams = match arguments {
                    Some(args) => serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {}", e), None))?,
                    None => VlmRunParams::default(),
                };

                self.vlm_run(tool_params).await
            }
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name), None)),
        }
    }
}

impl ServerHandler for VlmRunServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Image and document generation server backed by the VLM Run API. \
                 Use vlm_run with a prompt and a generation_type of 'image' or 'document'."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(rmcp::model::ListToolsResult {
                tools: Self::tool_definitions(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { self.call(params.name.as_ref(), params.arguments).await }
    }

    fn list_resources(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            debug!("Listing resources");
            Ok(ListResourcesResult {
                resources: Self::resource_definitions(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        params: rmcp::model::ReadResourceRequestParams,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = &params.uri;
            debug!(uri = %uri, "Reading resource");

            let content = self.resource_content(uri).ok_or_else(|| {
                McpError::resource_not_found(format!("Unknown resource: {}", uri), None)
            })?;

            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content, uri.clone())],
            })
        }
    }
}
