//! MCP tool router for the Fakturownia API.
//!
//! One tool per endpoint operation plus `get_invoice_pdf_url`. Every handler
//! delegates to the bridge's tool functions and converts failures into MCP
//! error results, so a failing call never takes the server down.

use std::fmt;

use fakturownia_mcp_bridge::{
    DecodedResponse, RequestExecutor,
    mcp::{
        clients,
        format::{render_error, render_success},
        invoices,
        models::{
            ChangeInvoiceStatusParams, CreateCategoryParams, CreateClientParams,
            CreateDepartmentParams, CreateInvoiceParams, CreatePaymentParams, CreateProductParams,
            CreateWarehouseDocumentParams, CreateWarehouseParams, GetInvoiceParams, IdParams,
            ListClientsParams, ListInvoicesParams, ListPaymentsParams, ListProductsParams,
            PageParams, UpdateCategoryParams, UpdateClientParams, UpdateDepartmentParams,
            UpdateInvoiceParams, UpdatePaymentParams, UpdateProductParams,
            UpdateWarehouseDocumentParams, UpdateWarehouseParams,
        },
        organization, payments, products, warehouse,
    },
};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData, Implementation, ProtocolVersion, ServerCapabilities,
        ServerInfo,
    },
    tool, tool_handler, tool_router,
};

/// Server name announced during MCP initialization.
pub const SERVER_NAME: &str = "fakturownia";

type ToolResult = Result<CallToolResult, ErrorData>;

/// MCP server exposing Fakturownia operations as tools.
#[derive(Clone)]
pub struct FakturowniaServer {
    executor: RequestExecutor,
    tool_router: ToolRouter<Self>,
}

impl fmt::Debug for FakturowniaServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakturowniaServer").field("executor", &self.executor).finish_non_exhaustive()
    }
}

/// Converts a bridge result into a tool result.
fn respond(result: fakturownia_mcp_bridge::Result<DecodedResponse>) -> ToolResult {
    match result {
        Ok(response) => Ok(CallToolResult::success(vec![Content::text(render_success(&response))])),
        Err(error) => {
            tracing::warn!(error = %error, "tool call failed");
            Ok(CallToolResult::error(vec![Content::text(render_error(&error))]))
        }
    }
}

#[tool_router]
impl FakturowniaServer {
    /// Creates a server sharing `executor` across all tools.
    #[must_use]
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor, tool_router: Self::tool_router() }
    }

    // Invoices

    #[tool(description = "List invoices with optional filters (page, period, kind, status, etc.)")]
    async fn list_invoices(&self, Parameters(params): Parameters<ListInvoicesParams>) -> ToolResult {
        respond(invoices::list_invoices(&self.executor, params).await)
    }

    #[tool(description = "Get a single invoice by ID")]
    async fn get_invoice(&self, Parameters(params): Parameters<GetInvoiceParams>) -> ToolResult {
        respond(invoices::get_invoice(&self.executor, params).await)
    }

    #[tool(
        description = "Create a new invoice. Provide invoice object with kind, positions, buyer info, etc."
    )]
    async fn create_invoice(&self, Parameters(params): Parameters<CreateInvoiceParams>) -> ToolResult {
        respond(invoices::create_invoice(&self.executor, params).await)
    }

    #[tool(description = "Update an existing invoice")]
    async fn update_invoice(&self, Parameters(params): Parameters<UpdateInvoiceParams>) -> ToolResult {
        respond(invoices::update_invoice(&self.executor, params).await)
    }

    #[tool(description = "Delete an invoice by ID")]
    async fn delete_invoice(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(invoices::delete_invoice(&self.executor, params).await)
    }

    #[tool(description = "Send an invoice by email")]
    async fn send_invoice_email(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(invoices::send_invoice_email(&self.executor, params).await)
    }

    #[tool(description = "Change the status of an invoice")]
    async fn change_invoice_status(
        &self,
        Parameters(params): Parameters<ChangeInvoiceStatusParams>,
    ) -> ToolResult {
        respond(invoices::change_invoice_status(&self.executor, params).await)
    }

    #[tool(description = "Get direct PDF download URL for an invoice")]
    async fn get_invoice_pdf_url(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(invoices::get_invoice_pdf_url(&self.executor, &params))
    }

    // KSeF

    #[tool(description = "Send an existing invoice to the KSeF system")]
    async fn send_invoice_to_ksef(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(invoices::send_invoice_to_ksef(&self.executor, params).await)
    }

    #[tool(description = "Get KSeF status for an invoice (gov_status, gov_id, errors, etc.)")]
    async fn get_invoice_ksef_status(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(invoices::get_invoice_ksef_status(&self.executor, params).await)
    }

    // Clients

    #[tool(description = "List clients with optional search filters")]
    async fn list_clients(&self, Parameters(params): Parameters<ListClientsParams>) -> ToolResult {
        respond(clients::list_clients(&self.executor, params).await)
    }

    #[tool(description = "Get a single client by ID")]
    async fn get_client(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(clients::get_client(&self.executor, params).await)
    }

    #[tool(description = "Create a new client. Only name is required.")]
    async fn create_client(&self, Parameters(params): Parameters<CreateClientParams>) -> ToolResult {
        respond(clients::create_client(&self.executor, params).await)
    }

    #[tool(description = "Update an existing client")]
    async fn update_client(&self, Parameters(params): Parameters<UpdateClientParams>) -> ToolResult {
        respond(clients::update_client(&self.executor, params).await)
    }

    #[tool(description = "Delete a client by ID")]
    async fn delete_client(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(clients::delete_client(&self.executor, params).await)
    }

    // Products

    #[tool(description = "List products with optional filters")]
    async fn list_products(&self, Parameters(params): Parameters<ListProductsParams>) -> ToolResult {
        respond(products::list_products(&self.executor, params).await)
    }

    #[tool(description = "Get a single product by ID")]
    async fn get_product(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(products::get_product(&self.executor, params).await)
    }

    #[tool(description = "Create a new product")]
    async fn create_product(&self, Parameters(params): Parameters<CreateProductParams>) -> ToolResult {
        respond(products::create_product(&self.executor, params).await)
    }

    #[tool(description = "Update an existing product")]
    async fn update_product(&self, Parameters(params): Parameters<UpdateProductParams>) -> ToolResult {
        respond(products::update_product(&self.executor, params).await)
    }

    // Payments

    #[tool(description = "List payments with optional filters")]
    async fn list_payments(&self, Parameters(params): Parameters<ListPaymentsParams>) -> ToolResult {
        respond(payments::list_payments(&self.executor, params).await)
    }

    #[tool(description = "Get a single payment by ID")]
    async fn get_payment(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(payments::get_payment(&self.executor, params).await)
    }

    #[tool(description = "Create a new payment")]
    async fn create_payment(&self, Parameters(params): Parameters<CreatePaymentParams>) -> ToolResult {
        respond(payments::create_payment(&self.executor, params).await)
    }

    #[tool(description = "Update an existing payment")]
    async fn update_payment(&self, Parameters(params): Parameters<UpdatePaymentParams>) -> ToolResult {
        respond(payments::update_payment(&self.executor, params).await)
    }

    #[tool(description = "Delete a payment by ID")]
    async fn delete_payment(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(payments::delete_payment(&self.executor, params).await)
    }

    // Warehouse documents

    #[tool(description = "List warehouse documents (PZ, WZ, MM)")]
    async fn list_warehouse_documents(&self, Parameters(params): Parameters<PageParams>) -> ToolResult {
        respond(warehouse::list_warehouse_documents(&self.executor, params).await)
    }

    #[tool(description = "Get a warehouse document by ID")]
    async fn get_warehouse_document(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(warehouse::get_warehouse_document(&self.executor, params).await)
    }

    #[tool(description = "Create a warehouse document (PZ, WZ, MM)")]
    async fn create_warehouse_document(
        &self,
        Parameters(params): Parameters<CreateWarehouseDocumentParams>,
    ) -> ToolResult {
        respond(warehouse::create_warehouse_document(&self.executor, params).await)
    }

    #[tool(description = "Update a warehouse document")]
    async fn update_warehouse_document(
        &self,
        Parameters(params): Parameters<UpdateWarehouseDocumentParams>,
    ) -> ToolResult {
        respond(warehouse::update_warehouse_document(&self.executor, params).await)
    }

    #[tool(description = "Delete a warehouse document by ID")]
    async fn delete_warehouse_document(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(warehouse::delete_warehouse_document(&self.executor, params).await)
    }

    // Warehouses

    #[tool(description = "List all warehouses")]
    async fn list_warehouses(&self) -> ToolResult {
        respond(warehouse::list_warehouses(&self.executor).await)
    }

    #[tool(description = "Get a warehouse by ID")]
    async fn get_warehouse(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(warehouse::get_warehouse(&self.executor, params).await)
    }

    #[tool(description = "Create a new warehouse")]
    async fn create_warehouse(&self, Parameters(params): Parameters<CreateWarehouseParams>) -> ToolResult {
        respond(warehouse::create_warehouse(&self.executor, params).await)
    }

    #[tool(description = "Update a warehouse")]
    async fn update_warehouse(&self, Parameters(params): Parameters<UpdateWarehouseParams>) -> ToolResult {
        respond(warehouse::update_warehouse(&self.executor, params).await)
    }

    #[tool(description = "Delete a warehouse by ID")]
    async fn delete_warehouse(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(warehouse::delete_warehouse(&self.executor, params).await)
    }

    // Categories

    #[tool(description = "List all categories")]
    async fn list_categories(&self) -> ToolResult {
        respond(organization::list_categories(&self.executor).await)
    }

    #[tool(description = "Get a category by ID")]
    async fn get_category(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(organization::get_category(&self.executor, params).await)
    }

    #[tool(description = "Create a new category")]
    async fn create_category(&self, Parameters(params): Parameters<CreateCategoryParams>) -> ToolResult {
        respond(organization::create_category(&self.executor, params).await)
    }

    #[tool(description = "Update a category")]
    async fn update_category(&self, Parameters(params): Parameters<UpdateCategoryParams>) -> ToolResult {
        respond(organization::update_category(&self.executor, params).await)
    }

    #[tool(description = "Delete a category by ID")]
    async fn delete_category(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(organization::delete_category(&self.executor, params).await)
    }

    // Departments

    #[tool(description = "List all company departments")]
    async fn list_departments(&self) -> ToolResult {
        respond(organization::list_departments(&self.executor).await)
    }

    #[tool(description = "Get a department by ID")]
    async fn get_department(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(organization::get_department(&self.executor, params).await)
    }

    #[tool(description = "Create a new department")]
    async fn create_department(
        &self,
        Parameters(params): Parameters<CreateDepartmentParams>,
    ) -> ToolResult {
        respond(organization::create_department(&self.executor, params).await)
    }

    #[tool(description = "Update a department")]
    async fn update_department(
        &self,
        Parameters(params): Parameters<UpdateDepartmentParams>,
    ) -> ToolResult {
        respond(organization::update_department(&self.executor, params).await)
    }

    #[tool(description = "Delete a department by ID")]
    async fn delete_department(&self, Parameters(params): Parameters<IdParams>) -> ToolResult {
        respond(organization::delete_department(&self.executor, params).await)
    }

    // Account

    #[tool(description = "Get current account information")]
    async fn get_account_info(&self) -> ToolResult {
        respond(organization::get_account_info(&self.executor).await)
    }
}

#[tool_handler]
impl ServerHandler for FakturowniaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Tools for the Fakturownia invoicing API: invoices (including KSeF), clients, \
                 products, payments, warehouses, categories, departments and account data. \
                 Payload arguments accept a JSON object or a string containing one."
                    .to_owned(),
            ),
        }
    }
}
