//! Tool parameter types.
//!
//! Every struct derives [`schemars::JsonSchema`] so the server can publish an
//! input schema per tool. List filters are optional strings and are forwarded
//! as query parameters verbatim. Payload fields accept either a JSON object or
//! a string containing one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single resource id.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct IdParams {
    /// Resource ID.
    pub id: u64,
}

/// Pagination only.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PageParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
}

// Invoices

/// Filters for `list_invoices`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListInvoicesParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page (max 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
    /// Period: `last_12_months`, `this_month`, `last_month`, `this_year`,
    /// `last_year`, `all`, `more`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Start date (YYYY-MM-DD) when `period=more`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// End date (YYYY-MM-DD) when `period=more`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// Invoice type: vat, proforma, correction, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Status: issued, sent, paid, partial, rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Include line items: true/false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_positions: Option<String>,
    /// 1 = income, 0 = expense.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<String>,
}

/// Parameters for `get_invoice`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GetInvoiceParams {
    /// Invoice ID.
    #[serde(skip_serializing)]
    pub id: u64,
    /// Include line items: true/false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_positions: Option<String>,
}

/// Parameters for `create_invoice`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateInvoiceParams {
    /// Invoice object (kind, positions, `buyer_name`, `buyer_tax_no`,
    /// `sell_date`, `issue_date`, etc.) as JSON or a JSON string.
    pub invoice: Value,
    /// Send to KSeF after saving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gov_save_and_send: Option<bool>,
}

/// Parameters for `update_invoice`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateInvoiceParams {
    /// Invoice ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub invoice: Value,
}

/// Parameters for `change_invoice_status`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ChangeInvoiceStatusParams {
    /// Invoice ID.
    #[serde(skip_serializing)]
    pub id: u64,
    /// New status: issued, sent, paid, partial, rejected.
    pub status: String,
}

// Clients

/// Filters for `list_clients`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListClientsParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page (max 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
    /// Search by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Search by email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Search by NIP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_no: Option<String>,
    /// Search by shortcut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// Search by external ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Parameters for `create_client`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateClientParams {
    /// Client object (name, `tax_no`, city, street, email, etc.) as JSON or a
    /// JSON string. Only name is required.
    pub client_data: Value,
}

/// Parameters for `update_client`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateClientParams {
    /// Client ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub client_data: Value,
}

// Products

/// Filters for `list_products`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListProductsParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page (max 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
    /// Filter by warehouse ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_id: Option<String>,
    /// Products changed after this date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
}

/// Parameters for `create_product`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateProductParams {
    /// Product object (name, code, `price_net`, tax, etc.) as JSON or a JSON string.
    pub product: Value,
}

/// Parameters for `update_product`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateProductParams {
    /// Product ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub product: Value,
}

// Payments

/// Filters for `list_payments`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListPaymentsParams {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<String>,
    /// Set to `invoices` to include linked invoice data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

/// Parameters for `create_payment`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreatePaymentParams {
    /// Payment object (name, price, `invoice_id` or `invoice_ids`, paid, kind,
    /// etc.) as JSON or a JSON string.
    pub payment: Value,
}

/// Parameters for `update_payment`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdatePaymentParams {
    /// Payment ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub payment: Value,
}

// Warehouse documents and warehouses

/// Parameters for `create_warehouse_document`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateWarehouseDocumentParams {
    /// Document object: kind (pz/wz/mm), `warehouse_id`, `issue_date`,
    /// `warehouse_actions[]`, etc. as JSON or a JSON string.
    pub document: Value,
}

/// Parameters for `update_warehouse_document`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateWarehouseDocumentParams {
    /// Warehouse document ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub document: Value,
}

/// Parameters for `create_warehouse`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateWarehouseParams {
    /// Warehouse object (name, etc.) as JSON or a JSON string.
    pub warehouse: Value,
}

/// Parameters for `update_warehouse`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateWarehouseParams {
    /// Warehouse ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub warehouse: Value,
}

// Categories and departments

/// Parameters for `create_category`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateCategoryParams {
    /// Category object (name, etc.) as JSON or a JSON string.
    pub category: Value,
}

/// Parameters for `update_category`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateCategoryParams {
    /// Category ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub category: Value,
}

/// Parameters for `create_department`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateDepartmentParams {
    /// Department object (name, shortcut, etc.) as JSON or a JSON string.
    pub department: Value,
}

/// Parameters for `update_department`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UpdateDepartmentParams {
    /// Department ID.
    pub id: u64,
    /// Fields to update, as JSON or a JSON string.
    pub department: Value,
}
