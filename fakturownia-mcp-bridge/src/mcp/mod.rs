//! Model Context Protocol (MCP) tool operations.
//!
//! Each function here backs exactly one MCP tool. It validates and normalizes
//! the tool parameters, builds a [`RequestIntent`](crate::transport::RequestIntent)
//! for its [`Operation`](crate::endpoint::Operation) and runs it on the shared
//! [`RequestExecutor`](crate::transport::RequestExecutor). Rendering results for
//! the agent lives in [`format`].
//!
//! # Available Tools
//!
//! ## Invoices
//! - [`invoices::list_invoices`], [`invoices::get_invoice`], [`invoices::create_invoice`],
//!   [`invoices::update_invoice`], [`invoices::delete_invoice`]
//! - [`invoices::send_invoice_email`], [`invoices::change_invoice_status`]
//! - [`invoices::get_invoice_pdf_url`] (no network call)
//!
//! ## KSeF
//! - [`invoices::send_invoice_to_ksef`], [`invoices::get_invoice_ksef_status`]
//!
//! ## Clients, products and payments
//! - [`clients`]: list, get, create, update, delete
//! - [`products`]: list, get, create, update
//! - [`payments`]: list, get, create, update, delete
//!
//! ## Warehouses
//! - [`warehouse`]: warehouse documents and warehouses
//!
//! ## Organization
//! - [`organization`]: categories, departments, account information
//!
//! # Architecture
//!
//! ```text
//! AI Agent
//!     │
//!     │ MCP Protocol (JSON-RPC 2.0 over stdio)
//!     ▼
//! MCP Tools (this module)
//!     │
//!     │ Parameter normalization
//!     ▼
//! RequestExecutor (transport module)
//!     │
//!     │ api_token, timeout, retry
//!     ▼
//! Fakturownia REST API (HTTPS)
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use fakturownia_mcp_bridge::{
//!     mcp::{clients::create_client, format::render_success, models::CreateClientParams},
//!     transport::{ClientConfig, RequestExecutor},
//! };
//! use serde_json::json;
//!
//! # async fn example() -> fakturownia_mcp_bridge::error::Result<()> {
//! let executor = RequestExecutor::new(&ClientConfig::from_env()?)?;
//!
//! let params = CreateClientParams { client_data: json!({"name": "ACME sp. z o.o."}) };
//! let created = create_client(&executor, params).await?;
//! println!("{}", render_success(&created));
//! # Ok(())
//! # }
//! ```

pub mod clients;
pub mod format;
pub mod http;
pub mod invoices;
pub mod models;
pub mod organization;
pub mod payments;
pub mod products;
pub mod warehouse;
