//! Resilient request execution against the Fakturownia API.
//!
//! This module separates what a call asks for from how it is carried out:
//! - **[`RequestIntent`]**: the operation's descriptor, resolved path, optional
//!   body and caller query. Built once per call and never changed by retries.
//! - **[`RequestExecutor`]**: authentication injection, per-attempt timeout,
//!   retry with backoff and response decoding.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fakturownia_mcp_bridge::{
//!     endpoint::Operation,
//!     transport::{ClientConfig, DecodedResponse, RequestExecutor, RequestIntent},
//! };
//!
//! # async fn example() -> fakturownia_mcp_bridge::error::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let executor = RequestExecutor::new(&config)?;
//!
//! let intent = RequestIntent::for_operation(Operation::ListInvoices, None)?
//!     .with_query([("period", "this_month"), ("page", "1")])?;
//!
//! if let DecodedResponse::Json(invoices) = executor.execute(&intent).await? {
//!     println!("{invoices:#}");
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Value};

use crate::{
    endpoint::{EndpointDescriptor, Operation},
    error::{BridgeError, Result},
};

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::RequestExecutor;

/// A single logical call, independent of how many attempts it takes.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestIntent {
    descriptor: EndpointDescriptor,
    path: String,
    body: Option<Map<String, Value>>,
    query: Vec<(String, String)>,
}

impl RequestIntent {
    /// Creates an intent for a descriptor, resolving its path against `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if `id` does not match the path
    /// template.
    pub fn new(descriptor: EndpointDescriptor, id: Option<u64>) -> Result<Self> {
        let path = descriptor.resolve_path(id)?;
        Ok(Self { descriptor, path, body: None, query: Vec::new() })
    }

    /// Creates an intent for a named operation.
    ///
    /// # Errors
    ///
    /// See [`RequestIntent::new`].
    pub fn for_operation(operation: Operation, id: Option<u64>) -> Result<Self> {
        Self::new(operation.descriptor(), id)
    }

    /// Sets the body verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the verb cannot carry a body.
    pub fn with_body(mut self, body: Map<String, Value>) -> Result<Self> {
        if !self.descriptor.method.carries_body() {
            return Err(BridgeError::InvalidInput(format!(
                "{} {} does not accept a body",
                self.descriptor.method, self.path
            )));
        }
        self.body = Some(body);
        Ok(self)
    }

    /// Sets the body from a caller payload, wrapped under the descriptor's body key.
    ///
    /// Operations without a body key take the payload object as the body itself.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the payload is not a JSON object
    /// or the verb cannot carry a body.
    pub fn with_payload(self, payload: Value) -> Result<Self> {
        let Value::Object(fields) = payload else {
            return Err(BridgeError::InvalidInput(format!(
                "payload for {} must be a JSON object",
                self.path
            )));
        };
        let body = match self.descriptor.body_key {
            Some(key) => {
                let mut wrapped = Map::new();
                wrapped.insert(key.to_owned(), Value::Object(fields));
                wrapped
            }
            None => fields,
        };
        self.with_body(body)
    }

    /// Adds caller query parameters; a repeated key replaces the earlier value.
    ///
    /// Passing no parameters is always allowed.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if parameters are given to an
    /// operation that does not accept them.
    pub fn with_query<I, K, V>(mut self, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            if !self.descriptor.accepts_query {
                return Err(BridgeError::InvalidInput(format!(
                    "{} {} does not accept query parameters",
                    self.descriptor.method, self.path
                )));
            }
            let key = key.into();
            let value = value.into();
            match self.query.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => self.query.push((key, value)),
            }
        }
        Ok(self)
    }

    /// The endpoint this intent targets.
    #[must_use]
    pub const fn descriptor(&self) -> &EndpointDescriptor {
        &self.descriptor
    }

    /// Resolved request path, e.g. `/invoices/42.json`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Body fields, if a body was supplied.
    #[must_use]
    pub const fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    /// Caller query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse {
    /// Body declared `application/json`. An empty body decodes as `null`.
    Json(Value),
    /// Any other body, verbatim.
    Text(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_intent_resolves_path() {
        let intent = RequestIntent::for_operation(Operation::GetClient, Some(9)).unwrap();
        assert_eq!(intent.path(), "/clients/9.json");
        assert!(intent.body().is_none());
        assert!(intent.query().is_empty());
    }

    #[test]
    fn test_intent_missing_id() {
        let result = RequestIntent::for_operation(Operation::DeleteInvoice, None);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_payload_wrapped_under_body_key() {
        let intent = RequestIntent::for_operation(Operation::CreateClient, None)
            .unwrap()
            .with_payload(json!({"name": "ACME", "tax_no": "1234567890"}))
            .unwrap();

        let body = Value::Object(intent.body().unwrap().clone());
        assert_eq!(body, json!({"client": {"name": "ACME", "tax_no": "1234567890"}}));
    }

    #[test]
    fn test_payload_must_be_object() {
        let result = RequestIntent::for_operation(Operation::CreateProduct, None)
            .unwrap()
            .with_payload(json!(["not", "an", "object"]));
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_body_rejected_for_get() {
        let result = RequestIntent::for_operation(Operation::ListClients, None)
            .unwrap()
            .with_body(Map::new());
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_body_allowed() {
        let intent = RequestIntent::for_operation(Operation::SendInvoiceEmail, Some(3))
            .unwrap()
            .with_body(Map::new())
            .unwrap();
        assert_eq!(intent.body(), Some(&Map::new()));
    }

    #[test]
    fn test_query_later_key_wins() {
        let intent = RequestIntent::for_operation(Operation::ListInvoices, None)
            .unwrap()
            .with_query([("page", "1"), ("period", "this_month"), ("page", "2")])
            .unwrap();
        assert_eq!(
            intent.query(),
            &[("page".to_owned(), "2".to_owned()), ("period".to_owned(), "this_month".to_owned())]
        );
    }

    #[test]
    fn test_query_rejected_when_not_accepted() {
        let result = RequestIntent::for_operation(Operation::GetClient, Some(1))
            .unwrap()
            .with_query([("fields", "name")]);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_empty_query_always_allowed() {
        let result = RequestIntent::for_operation(Operation::GetClient, Some(1))
            .unwrap()
            .with_query(Vec::<(String, String)>::new());
        assert!(result.is_ok());
    }
}
