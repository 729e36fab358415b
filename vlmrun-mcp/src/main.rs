//! VLM Run MCP Server
//!
//! MCP server exposing image and document generation through the VLM Run API.

use anyhow::Result;
use clap::Parser;
use vlmrun_mcp::VlmRunServer;
use vlmrun_mcp_common::tracing::init_tracing_with_default;
use vlmrun_mcp_common::{Config, McpServerBuilder, TransportArgs};

/// Command-line arguments for the VLM Run server.
#[derive(Parser, Debug)]
#[command(name = "vlmrun-mcp", version)]
#[command(about = "MCP server for image and document generation using the VLM Run API")]
struct Args {
    /// Transport configuration
    #[command(flatten)]
    transport: TransportArgs,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = vlmrun_mcp_common::tracing::DEFAULT_LEVEL)]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing_with_default(&args.log_level);

    tracing::info!("vlmrun-mcp server starting...");

    let config = Config::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        api_key_set = config.api_key.is_some(),
        timeout = ?config.timeout,
        "Configuration loaded"
    );

    let server = VlmRunServer::new(config);

    let transport = args.transport.into_transport();

    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
