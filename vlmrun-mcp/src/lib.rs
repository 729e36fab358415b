//! VLM Run MCP Server Library
//!
//! This library exposes VLM Run image and document generation as an MCP tool.

pub mod handler;
pub mod resources;
pub mod server;

pub use handler::{
    GenerationOutcome, GenerationRequest, GenerationType, ToolOutcome, ValidationError,
    VlmRunHandler, VlmRunParams,
};
pub use server::VlmRunServer;
