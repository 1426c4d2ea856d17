//! Product catalogue tools.

use crate::{
    endpoint::Operation,
    error::Result,
    mcp::{
        http::{execute_operation, parse_payload, query_from_params},
        models::{CreateProductParams, IdParams, ListProductsParams, UpdateProductParams},
    },
    transport::{DecodedResponse, RequestExecutor},
};

/// Lists products, optionally per warehouse or changed since a date.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_products(
    executor: &RequestExecutor,
    params: ListProductsParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::ListProducts, None, query, None).await
}

/// Fetches a single product.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_product(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetProduct, Some(params.id), Vec::new(), None).await
}

/// Creates a product.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_product(
    executor: &RequestExecutor,
    params: CreateProductParams,
) -> Result<DecodedResponse> {
    let product = parse_payload("product", params.product)?;
    execute_operation(executor, Operation::CreateProduct, None, Vec::new(), Some(product)).await
}

/// Updates a product.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_product(
    executor: &RequestExecutor,
    params: UpdateProductParams,
) -> Result<DecodedResponse> {
    let product = parse_payload("product", params.product)?;
    execute_operation(executor, Operation::UpdateProduct, Some(params.id), Vec::new(), Some(product))
        .await
}
