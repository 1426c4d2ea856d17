//! Operation catalogue and its route table.

use std::str::FromStr;

use super::{EndpointDescriptor, HttpMethod};
use crate::error::BridgeError;

const KSEF_STATUS_FIELDS: &str = "gov_status,gov_id,gov_send_date,gov_sell_date,\
gov_error_messages,gov_verification_link,gov_link,gov_corrected_invoice_number";

/// Logical operations supported by the Fakturownia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List invoices.
    ListInvoices,
    /// Get a single invoice.
    GetInvoice,
    /// Create an invoice.
    CreateInvoice,
    /// Update an invoice.
    UpdateInvoice,
    /// Delete an invoice.
    DeleteInvoice,
    /// Send an invoice to the buyer by email.
    SendInvoiceEmail,
    /// Change the status of an invoice.
    ChangeInvoiceStatus,
    /// Submit an invoice to KSeF.
    SendInvoiceToKsef,
    /// Read the KSeF submission fields of an invoice.
    GetInvoiceKsefStatus,
    /// List clients.
    ListClients,
    /// Get a single client.
    GetClient,
    /// Create a client.
    CreateClient,
    /// Update a client.
    UpdateClient,
    /// Delete a client.
    DeleteClient,
    /// List products.
    ListProducts,
    /// Get a single product.
    GetProduct,
    /// Create a product.
    CreateProduct,
    /// Update a product.
    UpdateProduct,
    /// List payments.
    ListPayments,
    /// Get a single payment.
    GetPayment,
    /// Create a payment.
    CreatePayment,
    /// Update a payment.
    UpdatePayment,
    /// Delete a payment.
    DeletePayment,
    /// List warehouse documents.
    ListWarehouseDocuments,
    /// Get a single warehouse document.
    GetWarehouseDocument,
    /// Create a warehouse document.
    CreateWarehouseDocument,
    /// Update a warehouse document.
    UpdateWarehouseDocument,
    /// Delete a warehouse document.
    DeleteWarehouseDocument,
    /// List categories.
    ListCategories,
    /// Get a single category.
    GetCategory,
    /// Create a category.
    CreateCategory,
    /// Update a category.
    UpdateCategory,
    /// Delete a category.
    DeleteCategory,
    /// List warehouses.
    ListWarehouses,
    /// Get a single warehouse.
    GetWarehouse,
    /// Create a warehouse.
    CreateWarehouse,
    /// Update a warehouse.
    UpdateWarehouse,
    /// Delete a warehouse.
    DeleteWarehouse,
    /// List departments.
    ListDepartments,
    /// Get a single department.
    GetDepartment,
    /// Create a department.
    CreateDepartment,
    /// Update a department.
    UpdateDepartment,
    /// Delete a department.
    DeleteDepartment,
    /// Get account information.
    GetAccountInfo,
}

impl Operation {
    /// Every operation, in table order.
    pub const ALL: [Self; 44] = [
        Self::ListInvoices,
        Self::GetInvoice,
        Self::CreateInvoice,
        Self::UpdateInvoice,
        Self::DeleteInvoice,
        Self::SendInvoiceEmail,
        Self::ChangeInvoiceStatus,
        Self::SendInvoiceToKsef,
        Self::GetInvoiceKsefStatus,
        Self::ListClients,
        Self::GetClient,
        Self::CreateClient,
        Self::UpdateClient,
        Self::DeleteClient,
        Self::ListProducts,
        Self::GetProduct,
        Self::CreateProduct,
        Self::UpdateProduct,
        Self::ListPayments,
        Self::GetPayment,
        Self::CreatePayment,
        Self::UpdatePayment,
        Self::DeletePayment,
        Self::ListWarehouseDocuments,
        Self::GetWarehouseDocument,
        Self::CreateWarehouseDocument,
        Self::UpdateWarehouseDocument,
        Self::DeleteWarehouseDocument,
        Self::ListCategories,
        Self::GetCategory,
        Self::CreateCategory,
        Self::UpdateCategory,
        Self::DeleteCategory,
        Self::ListWarehouses,
        Self::GetWarehouse,
        Self::CreateWarehouse,
        Self::UpdateWarehouse,
        Self::DeleteWarehouse,
        Self::ListDepartments,
        Self::GetDepartment,
        Self::CreateDepartment,
        Self::UpdateDepartment,
        Self::DeleteDepartment,
        Self::GetAccountInfo,
    ];

    /// Returns the snake_case tool name of this operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListInvoices => "list_invoices",
            Self::GetInvoice => "get_invoice",
            Self::CreateInvoice => "create_invoice",
            Self::UpdateInvoice => "update_invoice",
            Self::DeleteInvoice => "delete_invoice",
            Self::SendInvoiceEmail => "send_invoice_email",
            Self::ChangeInvoiceStatus => "change_invoice_status",
            Self::SendInvoiceToKsef => "send_invoice_to_ksef",
            Self::GetInvoiceKsefStatus => "get_invoice_ksef_status",
            Self::ListClients => "list_clients",
            Self::GetClient => "get_client",
            Self::CreateClient => "create_client",
            Self::UpdateClient => "update_client",
            Self::DeleteClient => "delete_client",
            Self::ListProducts => "list_products",
            Self::GetProduct => "get_product",
            Self::CreateProduct => "create_product",
            Self::UpdateProduct => "update_product",
            Self::ListPayments => "list_payments",
            Self::GetPayment => "get_payment",
            Self::CreatePayment => "create_payment",
            Self::UpdatePayment => "update_payment",
            Self::DeletePayment => "delete_payment",
            Self::ListWarehouseDocuments => "list_warehouse_documents",
            Self::GetWarehouseDocument => "get_warehouse_document",
            Self::CreateWarehouseDocument => "create_warehouse_document",
            Self::UpdateWarehouseDocument => "update_warehouse_document",
            Self::DeleteWarehouseDocument => "delete_warehouse_document",
            Self::ListCategories => "list_categories",
            Self::GetCategory => "get_category",
            Self::CreateCategory => "create_category",
            Self::UpdateCategory => "update_category",
            Self::DeleteCategory => "delete_category",
            Self::ListWarehouses => "list_warehouses",
            Self::GetWarehouse => "get_warehouse",
            Self::CreateWarehouse => "create_warehouse",
            Self::UpdateWarehouse => "update_warehouse",
            Self::DeleteWarehouse => "delete_warehouse",
            Self::ListDepartments => "list_departments",
            Self::GetDepartment => "get_department",
            Self::CreateDepartment => "create_department",
            Self::UpdateDepartment => "update_department",
            Self::DeleteDepartment => "delete_department",
            Self::GetAccountInfo => "get_account_info",
        }
    }

    /// Returns the route data for this operation.
    #[must_use]
    #[allow(clippy::too_many_lines, reason = "one arm per operation keeps the table greppable")]
    pub const fn descriptor(self) -> EndpointDescriptor {
        use HttpMethod::{Delete, Get, Patch, Post, Put};

        match self {
            // Invoices
            Self::ListInvoices => route(Get, "/invoices.json", None, true),
            Self::GetInvoice => route(Get, "/invoices/{id}.json", None, true),
            Self::CreateInvoice => route(Post, "/invoices.json", Some("invoice"), true),
            Self::UpdateInvoice => route(Put, "/invoices/{id}.json", Some("invoice"), false),
            Self::DeleteInvoice => route(Delete, "/invoices/{id}.json", None, false),
            Self::SendInvoiceEmail => route(Post, "/invoices/{id}/send_by_email.json", None, false),
            Self::ChangeInvoiceStatus => route(Get, "/invoices/{id}/change_status.json", None, true),
            Self::SendInvoiceToKsef => EndpointDescriptor {
                fixed_query: &[("send_to_ksef", "yes")],
                ..route(Get, "/invoices/{id}.json", None, false)
            },
            Self::GetInvoiceKsefStatus => EndpointDescriptor {
                fixed_query: &[("fields[invoice]", KSEF_STATUS_FIELDS)],
                ..route(Get, "/invoices/{id}.json", None, false)
            },

            // Clients
            Self::ListClients => route(Get, "/clients.json", None, true),
            Self::GetClient => route(Get, "/clients/{id}.json", None, false),
            Self::CreateClient => route(Post, "/clients.json", Some("client"), false),
            Self::UpdateClient => route(Put, "/clients/{id}.json", Some("client"), false),
            Self::DeleteClient => route(Delete, "/clients/{id}.json", None, false),

            // Products
            Self::ListProducts => route(Get, "/products.json", None, true),
            Self::GetProduct => route(Get, "/products/{id}.json", None, false),
            Self::CreateProduct => route(Post, "/products.json", Some("product"), false),
            Self::UpdateProduct => route(Put, "/products/{id}.json", Some("product"), false),

            // Payments
            Self::ListPayments => route(Get, "/banking/payments.json", None, true),
            Self::GetPayment => route(Get, "/banking/payments/{id}.json", None, false),
            Self::CreatePayment => {
                route(Post, "/banking/payments.json", Some("banking_payment"), false)
            }
            Self::UpdatePayment => {
                route(Patch, "/banking/payments/{id}.json", Some("banking_payment"), false)
            }
            Self::DeletePayment => route(Delete, "/banking/payments/{id}.json", None, false),

            // Warehouse documents
            Self::ListWarehouseDocuments => route(Get, "/warehouse_documents.json", None, true),
            Self::GetWarehouseDocument => {
                route(Get, "/warehouse_documents/{id}.json", None, false)
            }
            Self::CreateWarehouseDocument => {
                route(Post, "/warehouse_documents.json", Some("warehouse_document"), false)
            }
            Self::UpdateWarehouseDocument => {
                route(Put, "/warehouse_documents/{id}.json", Some("warehouse_document"), false)
            }
            Self::DeleteWarehouseDocument => {
                route(Delete, "/warehouse_documents/{id}.json", None, false)
            }

            // Categories
            Self::ListCategories => route(Get, "/categories.json", None, false),
            Self::GetCategory => route(Get, "/categories/{id}.json", None, false),
            Self::CreateCategory => route(Post, "/categories.json", Some("category"), false),
            Self::UpdateCategory => route(Put, "/categories/{id}.json", Some("category"), false),
            Self::DeleteCategory => route(Delete, "/categories/{id}.json", None, false),

            // Warehouses
            Self::ListWarehouses => route(Get, "/warehouses.json", None, false),
            Self::GetWarehouse => route(Get, "/warehouses/{id}.json", None, false),
            Self::CreateWarehouse => route(Post, "/warehouses.json", Some("warehouse"), false),
            Self::UpdateWarehouse => route(Put, "/warehouses/{id}.json", Some("warehouse"), false),
            Self::DeleteWarehouse => route(Delete, "/warehouses/{id}.json", None, false),

            // Departments
            Self::ListDepartments => route(Get, "/departments.json", None, false),
            Self::GetDepartment => route(Get, "/departments/{id}.json", None, false),
            Self::CreateDepartment => route(Post, "/departments.json", Some("department"), false),
            Self::UpdateDepartment => {
                route(Put, "/departments/{id}.json", Some("department"), false)
            }
            Self::DeleteDepartment => route(Delete, "/departments/{id}.json", None, false),

            // Account
            Self::GetAccountInfo => EndpointDescriptor {
                fixed_query: &[("integration_token", "")],
                ..route(Get, "/account.json", None, false)
            },
        }
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| BridgeError::UnknownOperation(name.to_owned()))
    }
}

const fn route(
    method: HttpMethod,
    path_template: &'static str,
    body_key: Option<&'static str>,
    accepts_query: bool,
) -> EndpointDescriptor {
    EndpointDescriptor { method, path_template, body_key, accepts_query, fixed_query: &[] }
}
