//! Fakturownia MCP Bridge: resilient access to the Fakturownia invoicing API
//!
//! A Rust library that exposes the Fakturownia REST API (invoices, KSeF,
//! clients, products, payments, warehouses, categories, departments, account)
//! as a set of operations an AI agent can call over the Model Context Protocol.
//!
//! # What does it provide?
//!
//! - **Endpoint table**: every operation maps to one verb, path template, body
//!   key and query policy ([`endpoint`])
//! - **Resilient executor**: token injection, per-attempt timeout, retry with
//!   jittered exponential backoff on 429/5xx and timeouts ([`transport`])
//! - **Tool operations**: JSON-schema described parameters and result
//!   rendering ready for an MCP server ([`mcp`])
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AI Agent      │  any MCP-compatible client
//! └────────┬────────┘
//!          │ MCP Protocol (JSON-RPC 2.0, stdio)
//!          │
//! ┌────────▼────────────────────────────────────────┐
//! │        Fakturownia MCP Bridge (this crate)      │
//! │  ┌──────────────┐      ┌──────────────────┐     │
//! │  │  MCP Tools   │──────│ RequestExecutor  │     │
//! │  │  (mcp)       │      │ (timeout, retry) │     │
//! │  └──────────────┘      └──────────────────┘     │
//! └────────┬────────────────────────────────────────┘
//!          │ HTTPS + api_token
//!          │
//! ┌────────▼────────────────┐
//! │  {domain}.fakturownia.pl │
//! └─────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fakturownia_mcp_bridge::{
//!     endpoint::Operation,
//!     mcp::format::render_success,
//!     transport::{ClientConfig, RequestExecutor, RequestIntent},
//! };
//! use serde_json::json;
//!
//! # async fn example() -> fakturownia_mcp_bridge::error::Result<()> {
//! // FAKTUROWNIA_API_TOKEN and FAKTUROWNIA_DOMAIN must be set
//! let executor = RequestExecutor::new(&ClientConfig::from_env()?)?;
//!
//! let intent = RequestIntent::for_operation(Operation::CreateProduct, None)?
//!     .with_payload(json!({"name": "Consulting", "price_net": "100.00", "tax": "23"}))?;
//!
//! let product = executor.execute(&intent).await?;
//! println!("{}", render_success(&product));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`], an alias for
//! `std::result::Result<T, BridgeError>`. Rate limiting and server faults are
//! retried internally; what reaches the caller is final.
//!
//! ```rust,no_run
//! use fakturownia_mcp_bridge::{BridgeError, endpoint::Operation, transport::RequestIntent};
//! # use fakturownia_mcp_bridge::transport::RequestExecutor;
//!
//! # async fn example(executor: &RequestExecutor) {
//! let intent = RequestIntent::for_operation(Operation::GetInvoice, Some(1)).unwrap();
//! match executor.execute(&intent).await {
//!     Ok(invoice) => println!("{invoice:?}"),
//!     Err(BridgeError::Api { status: 404, .. }) => eprintln!("no such invoice"),
//!     Err(BridgeError::RetriesExhausted { status, attempts, .. }) => {
//!         eprintln!("service unavailable ({status}) after {attempts} attempts");
//!     }
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from rmcp and reqwest"
)]

pub mod endpoint;
pub mod error;
pub mod mcp;
pub mod reliability;
pub mod transport;

pub use endpoint::{EndpointDescriptor, HttpMethod, Operation};
pub use error::{BridgeError, Result};
pub use transport::{ClientConfig, DecodedResponse, RequestExecutor, RequestIntent};
