//! Tracing initialization for the VLM Run MCP server.
//!
//! Sets up a `tracing-subscriber` registry with environment-based filtering
//! via the `RUST_LOG` environment variable.
//!
//! # Usage
//!
//! ```no_run
//! use vlmrun_mcp_common::tracing::init_tracing;
//!
//! fn main() {
//!     init_tracing();
//!     tracing::info!("Application started");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Controls the log level and filtering. Examples:
//!   - `RUST_LOG=debug` - Enable debug logging for all modules
//!   - `RUST_LOG=vlmrun_mcp=debug` - Enable debug for the server crate
//!   - `RUST_LOG=warn,vlmrun_mcp_common=debug` - Warn by default, debug for common
//!
//! Logs are written to stderr. With the stdio transport, stdout carries MCP
//! frames and must not receive log lines.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

fn subscriber(default_level: &str) -> impl ::tracing::Subscriber + Send + Sync + 'static {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer)
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LEVEL);
}

/// Initialize tracing with a custom default level used when `RUST_LOG` is
/// not set.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_tracing_with_default(default_level: &str) {
    subscriber(default_level).init();
}

/// Try to initialize tracing, returning an error if already initialized.
///
/// # Returns
///
/// - `Ok(())` if initialization succeeded
/// - `Err(())` if the subscriber was already set
pub fn try_init_tracing() -> Result<(), ()> {
    subscriber(DEFAULT_LEVEL).try_init().map_err(|_| ())
}
