//! Workspace-level integration tests for the VLM Run MCP server.
//!
//! These tests verify:
//! - The server can be instantiated and reports its capabilities
//! - Tool registration and schema generation
//! - Property-based tests for tool schema validity, input validation, and output format

pub mod tool_schema;
pub mod output_format;
