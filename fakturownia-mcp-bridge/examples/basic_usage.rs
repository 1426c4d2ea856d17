//! Basic example: list this month's invoices and create a product.
//!
//! # Running this example
//!
//! ```bash
//! export FAKTUROWNIA_API_TOKEN=<token from Settings > Account settings > Integration>
//! export FAKTUROWNIA_DOMAIN=<your subdomain, e.g. acme>
//! cargo run --example basic_usage
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use fakturownia_mcp_bridge::{
    BridgeError,
    mcp::{
        format::{render_error, render_success},
        invoices::{get_invoice_pdf_url, list_invoices},
        models::{CreateProductParams, IdParams, ListInvoicesParams},
        products::create_product,
    },
    transport::{ClientConfig, RequestExecutor},
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Fakturownia MCP Bridge: Basic Usage Example\n");

    println!("1. Loading configuration from environment...");
    let config = ClientConfig::from_env()?;
    let executor = RequestExecutor::new(&config)?;
    println!("   ✓ Talking to {}", executor.base_url());

    println!("\n2. Listing invoices issued this month...");
    let params = ListInvoicesParams {
        period: Some("this_month".into()),
        per_page: Some("5".into()),
        ..ListInvoicesParams::default()
    };
    match list_invoices(&executor, params).await {
        Ok(invoices) => println!("{}", render_success(&invoices)),
        Err(e) => eprintln!("{}", render_error(&e)),
    }

    println!("\n3. Creating a product...");
    let params = CreateProductParams {
        product: json!({"name": "Consulting hour", "price_net": "150.00", "tax": "23"}),
    };
    match create_product(&executor, params).await {
        Ok(product) => println!("{}", render_success(&product)),
        Err(BridgeError::Api { status: 401 | 403, .. }) => {
            eprintln!("   ✗ The API token was rejected; check FAKTUROWNIA_API_TOKEN");
        }
        Err(e) => eprintln!("{}", render_error(&e)),
    }

    println!("\n4. Building a PDF link (no request is sent)...");
    let link = get_invoice_pdf_url(&executor, &IdParams { id: 1 })?;
    println!("{}", render_success(&link));

    Ok(())
}
