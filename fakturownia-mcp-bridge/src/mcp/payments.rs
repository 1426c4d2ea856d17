//! Banking payment tools.
//!
//! Payments live under `/banking/payments` and are updated with `PATCH`.

use crate::{
    endpoint::Operation,
    error::Result,
    mcp::{
        http::{execute_operation, parse_payload, query_from_params},
        models::{CreatePaymentParams, IdParams, ListPaymentsParams, UpdatePaymentParams},
    },
    transport::{DecodedResponse, RequestExecutor},
};

/// Lists payments; `include=invoices` embeds the linked invoices.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_payments(
    executor: &RequestExecutor,
    params: ListPaymentsParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::ListPayments, None, query, None).await
}

/// Fetches a single payment.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_payment(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetPayment, Some(params.id), Vec::new(), None).await
}

/// Records a payment.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_payment(
    executor: &RequestExecutor,
    params: CreatePaymentParams,
) -> Result<DecodedResponse> {
    let payment = parse_payload("payment", params.payment)?;
    execute_operation(executor, Operation::CreatePayment, None, Vec::new(), Some(payment)).await
}

/// Updates a payment.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_payment(
    executor: &RequestExecutor,
    params: UpdatePaymentParams,
) -> Result<DecodedResponse> {
    let payment = parse_payload("payment", params.payment)?;
    execute_operation(executor, Operation::UpdatePayment, Some(params.id), Vec::new(), Some(payment))
        .await
}

/// Deletes a payment.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_payment(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeletePayment, Some(params.id), Vec::new(), None).await
}
