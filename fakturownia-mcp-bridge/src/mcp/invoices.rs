//! Invoice tools, KSeF submission included.

use serde_json::json;
use tracing::{info, instrument};

use crate::{
    endpoint::Operation,
    error::{BridgeError, Result},
    mcp::{
        http::{execute_operation, parse_payload, query_from_params},
        models::{
            ChangeInvoiceStatusParams, CreateInvoiceParams, GetInvoiceParams, IdParams,
            ListInvoicesParams, UpdateInvoiceParams,
        },
    },
    transport::{DecodedResponse, RequestExecutor},
};

const PDF_URL_MESSAGE: &str = "PDF is available at the URL above (requires authentication). \
Use the Fakturownia web interface to download or share the PDF securely.";

/// Lists invoices matching the given filters.
///
/// # Errors
///
/// Returns error if the request fails.
///
/// # Examples
///
/// ```no_run
/// use fakturownia_mcp_bridge::{
///     mcp::{invoices::list_invoices, models::ListInvoicesParams},
///     transport::{ClientConfig, RequestExecutor},
/// };
///
/// # async fn example() -> fakturownia_mcp_bridge::error::Result<()> {
/// let executor = RequestExecutor::new(&ClientConfig::from_env()?)?;
/// let params = ListInvoicesParams {
///     period: Some("this_month".into()),
///     status: Some("paid".into()),
///     ..ListInvoicesParams::default()
/// };
///
/// let invoices = list_invoices(&executor, params).await?;
/// # Ok(())
/// # }
/// ```
pub async fn list_invoices(
    executor: &RequestExecutor,
    params: ListInvoicesParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::ListInvoices, None, query, None).await
}

/// Fetches a single invoice.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_invoice(
    executor: &RequestExecutor,
    params: GetInvoiceParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::GetInvoice, Some(params.id), query, None).await
}

/// Creates an invoice, optionally submitting it to KSeF right away.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if the invoice payload is not a JSON
/// object, or error if the request fails.
#[instrument(skip(executor, params), fields(gov_save_and_send = ?params.gov_save_and_send))]
pub async fn create_invoice(
    executor: &RequestExecutor,
    params: CreateInvoiceParams,
) -> Result<DecodedResponse> {
    let invoice = parse_payload("invoice", params.invoice)?;
    let query = if params.gov_save_and_send == Some(true) {
        vec![("gov_save_and_send".to_owned(), "1".to_owned())]
    } else {
        Vec::new()
    };

    info!("creating invoice");
    execute_operation(executor, Operation::CreateInvoice, None, query, Some(invoice)).await
}

/// Updates an existing invoice.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] for a malformed payload, or error if
/// the request fails.
pub async fn update_invoice(
    executor: &RequestExecutor,
    params: UpdateInvoiceParams,
) -> Result<DecodedResponse> {
    let invoice = parse_payload("invoice", params.invoice)?;
    execute_operation(executor, Operation::UpdateInvoice, Some(params.id), Vec::new(), Some(invoice))
        .await
}

/// Deletes an invoice.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_invoice(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteInvoice, Some(params.id), Vec::new(), None).await
}

/// Emails an invoice to the buyer.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn send_invoice_email(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::SendInvoiceEmail, Some(params.id), Vec::new(), None)
        .await
}

/// Changes the status of an invoice.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn change_invoice_status(
    executor: &RequestExecutor,
    params: ChangeInvoiceStatusParams,
) -> Result<DecodedResponse> {
    let query = vec![("status".to_owned(), params.status)];
    execute_operation(executor, Operation::ChangeInvoiceStatus, Some(params.id), query, None).await
}

/// Submits an existing invoice to KSeF.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn send_invoice_to_ksef(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::SendInvoiceToKsef, Some(params.id), Vec::new(), None)
        .await
}

/// Reads the KSeF submission fields of an invoice.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_invoice_ksef_status(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetInvoiceKsefStatus, Some(params.id), Vec::new(), None)
        .await
}

/// Returns where the invoice PDF lives, without contacting the API.
///
/// The URL carries no token; opening it requires an authenticated session.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if the URL cannot be built.
pub fn get_invoice_pdf_url(executor: &RequestExecutor, params: &IdParams) -> Result<DecodedResponse> {
    let url = executor
        .base_url()
        .join(&format!("invoices/{}.pdf", params.id))
        .map_err(|e| BridgeError::InvalidInput(format!("cannot build PDF URL: {e}")))?;

    Ok(DecodedResponse::Json(json!({
        "pdf_url": {
            "pdf_url_internal": url.as_str(),
            "message": PDF_URL_MESSAGE,
        }
    })))
}
