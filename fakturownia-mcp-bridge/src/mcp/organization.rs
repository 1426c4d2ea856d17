//! Account-level tools: categories, departments and account information.

use crate::{
    endpoint::Operation,
    error::Result,
    mcp::{
        http::{execute_operation, parse_payload},
        models::{
            CreateCategoryParams, CreateDepartmentParams, IdParams, UpdateCategoryParams,
            UpdateDepartmentParams,
        },
    },
    transport::{DecodedResponse, RequestExecutor},
};

/// Lists all categories.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_categories(executor: &RequestExecutor) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::ListCategories, None, Vec::new(), None).await
}

/// Fetches a single category.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_category(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetCategory, Some(params.id), Vec::new(), None).await
}

/// Creates a category.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_category(
    executor: &RequestExecutor,
    params: CreateCategoryParams,
) -> Result<DecodedResponse> {
    let category = parse_payload("category", params.category)?;
    execute_operation(executor, Operation::CreateCategory, None, Vec::new(), Some(category)).await
}

/// Updates a category.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_category(
    executor: &RequestExecutor,
    params: UpdateCategoryParams,
) -> Result<DecodedResponse> {
    let category = parse_payload("category", params.category)?;
    execute_operation(executor, Operation::UpdateCategory, Some(params.id), Vec::new(), Some(category))
        .await
}

/// Deletes a category.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_category(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteCategory, Some(params.id), Vec::new(), None).await
}

/// Lists all company departments.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn list_departments(executor: &RequestExecutor) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::ListDepartments, None, Vec::new(), None).await
}

/// Fetches a single department.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_department(executor: &RequestExecutor, params: IdParams) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetDepartment, Some(params.id), Vec::new(), None).await
}

/// Creates a department.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn create_department(
    executor: &RequestExecutor,
    params: CreateDepartmentParams,
) -> Result<DecodedResponse> {
    let department = parse_payload("department", params.department)?;
    execute_operation(executor, Operation::CreateDepartment, None, Vec::new(), Some(department))
        .await
}

/// Updates a department.
///
/// # Errors
///
/// Returns error if the payload is malformed or the request fails.
pub async fn update_department(
    executor: &RequestExecutor,
    params: UpdateDepartmentParams,
) -> Result<DecodedResponse> {
    let department = parse_payload("department", params.department)?;
    execute_operation(
        executor,
        Operation::UpdateDepartment,
        Some(params.id),
        Vec::new(),
        Some(department),
    )
    .await
}

/// Deletes a department.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn delete_department(
    executor: &RequestExecutor,
    params: IdParams,
) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::DeleteDepartment, Some(params.id), Vec::new(), None).await
}

/// Fetches the current account.
///
/// # Errors
///
/// Returns error if the request fails.
pub async fn get_account_info(executor: &RequestExecutor) -> Result<DecodedResponse> {
    execute_operation(executor, Operation::GetAccountInfo, None, Vec::new(), None).await
}
