//! Fakturownia MCP Server - exposes the Fakturownia invoicing API as MCP tools
//!
//! Speaks MCP over stdio. Configuration comes from the environment:
//!
//! - `FAKTUROWNIA_API_TOKEN`, `FAKTUROWNIA_DOMAIN` (required)
//! - `FAKTUROWNIA_TIMEOUT_MS`, `FAKTUROWNIA_MAX_RETRIES`, `FAKTUROWNIA_BASE_URL`,
//!   `FAKTUROWNIA_CONFIG` (optional)
//! - `RUST_LOG`, `LOG_FORMAT` (logging, written to stderr)

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

mod observability;
mod server;

use std::process::ExitCode;

use fakturownia_mcp_bridge::{ClientConfig, RequestExecutor};
use rmcp::{ServiceExt, transport::stdio};
use tracing::{error, info};

use crate::{
    observability::{LogFormat, init_observability},
    server::{FakturowniaServer, SERVER_NAME},
};

#[tokio::main]
async fn main() -> ExitCode {
    init_observability(LogFormat::from_env());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let executor = RequestExecutor::new(&config)?;

    info!(
        server = SERVER_NAME,
        version = env!("CARGO_PKG_VERSION"),
        base_url = %executor.base_url(),
        timeout_ms = config.timeout_ms,
        max_retries = config.max_retries,
        "starting MCP server on stdio"
    );

    let service = FakturowniaServer::new(executor).serve(stdio()).await?;
    let reason = service.waiting().await?;

    info!(reason = ?reason, "MCP session ended");
    Ok(())
}
