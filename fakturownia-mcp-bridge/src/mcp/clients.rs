//! Client (buyer) tools.

use crate::{
    endpoint::Operation,
    error::Result,
    mcp::{
        http::{execute_operation, parse_payload, query_from_params},
        models::{CreateClientParams, IdParams, ListClientsParams, UpdateClientParams},
    },
    transport::{DecodedResponse, RequestExecutor},
};

/// Lists clients, optionally filtered by name, email, NIP, shortcut or external id.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_clients(
    executor: &RequestExecutor,
    params: ListClientsParams,
) -> Result<DecodedResponse> {
    let query = query_from_params(&params)?;
    execute_operation(executor, Operation::ListClients, None, query, None).await
}

/// Fetches a single client.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_client(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetClient, Some(params.id), Vec::new(), None).await
}

/// Creates a client.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_client(
    executor: &RequestExecutor,
    params: CreateClientParams,
) -> Result<DecodedResponse> {
    let client = parse_payload("client_data", params.client_data)?;
    execute_operation(executor, Operation::CreateClient, None, Vec::new(), Some(client)).await
}

/// Updates a client.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_client(
    executor: &RequestExecutor,
    params: UpdateClientParams,
) -> Result<DecodedResponse> {
    let client = parse_payload("client_data", params.client_data)?;
    execute_operation(executor, Operation::UpdateClient, Some(params.id), Vec::new(), Some(client))
        .await
}

/// Deletes a client.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_client(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteClient, Some(params.id), Vec::new(), None).await
}
