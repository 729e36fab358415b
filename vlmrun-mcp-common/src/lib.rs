//! VLM Run MCP Common Library
//!
//! Shared configuration, error types, the JSON HTTP client, tracing setup,
//! transport selection and the MCP server builder used by the VLM Run MCP
//! server.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod tracing;
pub mod transport;


pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use http::JsonClient;
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
