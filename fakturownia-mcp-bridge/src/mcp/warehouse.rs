//! Warehouse and warehouse document (PZ, WZ, MM) tools.

use crate::{
    endpoint::Operation,
    error::Result,
    mcp::{
        http::{execute_operation, parse_payload, query_from_params},
        models::{
            CreateWarehouseDocumentParams, CreateWarehouseParams, IdParams, PageParams,
            UpdateWarehouseDocumentParams, UpdateWarehouseParams,
        },
    },
    transport::{DecodedResponse, RequestExecutor},
};

/// Lists warehouse documents.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_warehouse_documents(
    executor: &RequestExecutor,
    params: PageParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::ListWarehouseDocuments, None, query, None).await
}

/// Fetches a single warehouse document.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_warehouse_document(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetWarehouseDocument, Some(params.id), Vec::new(), None)
        .await
}

/// Creates a warehouse document.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_warehouse_document(
    executor: &RequestExecutor,
    params: CreateWarehouseDocumentParams,
) -> Result<DecodedResponse> {
    let document = parse_payload("document", params.document)?;
    execute_operation(executor, Operation::CreateWarehouseDocument, None, Vec::new(), Some(document))
        .await
}

/// Updates a warehouse document.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_warehouse_document(
    executor: &RequestExecutor,
    params: UpdateWarehouseDocumentParams,
) -> Result<DecodedResponse> {
    let document = parse_payload("document", params.document)?;
    execute_operation(
        executor,
        Operation::UpdateWarehouseDocument,
        Some(params.id),
        Vec::new(),
        Some(document),
    )
    .await
}

/// Deletes a warehouse document.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_warehouse_document(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteWarehouseDocument, Some(params.id), Vec::new(), None)
        .await
}

/// Lists warehouses.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_warehouses(executor: &RequestExecutor) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::ListWarehouses, None, Vec::new(), None).await
}

/// Fetches a single warehouse.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_warehouse(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetWarehouse, Some(params.id), Vec::new(), None).await
}

/// Creates a warehouse.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_warehouse(
    executor: &RequestExecutor,
    params: CreateWarehouseParams,
) -> Result<DecodedResponse> {
    let warehouse = parse_payload("warehouse", params.warehouse)?;
    execute_operation(executor, Operation::CreateWarehouse, None, Vec::new(), Some(warehouse)).await
}

/// Updates a warehouse.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_warehouse(
    executor: &RequestExecutor,
    params: UpdateWarehouseParams,
) -> Result<DecodedResponse> {
    let warehouse = parse_payload("warehouse", params.warehouse)?;
    execute_operation(executor, Operation::UpdateWarehouse, Some(params.id), Vec::new(), Some(warehouse))
        .await
}

/// Deletes a warehouse.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_warehouse(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteWarehouse, Some(params.id), Vec::new(), None).await
}
