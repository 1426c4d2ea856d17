//! Static endpoint table for the Fakturownia REST API.
//!
//! Every logical operation maps to exactly one [`EndpointDescriptor`]: the HTTP
//! verb, a path template with an optional `{id}` placeholder, the key the payload
//! is wrapped under, and whether caller query parameters are accepted.
//!
//! # Examples
//!
//! ```
//! use fakturownia_mcp_bridge::endpoint::{HttpMethod, Operation};
//!
//! let descriptor = Operation::UpdateInvoice.descriptor();
//! assert_eq!(descriptor.method, HttpMethod::Put);
//! assert_eq!(descriptor.resolve_path(Some(42))?, "/invoices/42.json");
//! assert_eq!(descriptor.body_key, Some("invoice"));
//! # Ok::<(), fakturownia_mcp_bridge::BridgeError>(())
//! ```

use std::fmt;

use crate::error::{BridgeError, Result};

mod table;

pub use table::Operation;

/// Placeholder substituted with the resource id in path templates.
const ID_PLACEHOLDER: &str = "{id}";

/// HTTP verbs used by the Fakturownia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the verb as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb may carry a JSON body.
    ///
    /// Bodyless verbs authenticate through the query string instead.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Route data for one logical operation.
///
/// Descriptors are `'static` and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path template, e.g. `/invoices/{id}.json`.
    pub path_template: &'static str,
    /// Key the caller payload is wrapped under, e.g. `invoice`.
    pub body_key: Option<&'static str>,
    /// Whether caller-supplied query parameters are accepted.
    pub accepts_query: bool,
    /// Query pairs always sent with this operation.
    pub fixed_query: &'static [(&'static str, &'static str)],
}

impl EndpointDescriptor {
    /// Whether the path template contains an `{id}` placeholder.
    #[must_use]
    pub fn requires_id(&self) -> bool {
        self.path_template.contains(ID_PLACEHOLDER)
    }

    /// Resolves the path template against a resource id.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidInput`] if the template needs an id and none
    /// was given, or an id was given for a template without a placeholder.
    pub fn resolve_path(&self, id: Option<u64>) -> Result<String> {
        match (self.requires_id(), id) {
            (true, Some(id)) => Ok(self.path_template.replace(ID_PLACEHOLDER, &id.to_string())),
            (false, None) => Ok(self.path_template.to_owned()),
            (true, None) => Err(BridgeError::InvalidInput(format!(
                "{} {} requires a resource id",
                self.method, self.path_template
            ))),
            (false, Some(id)) => Err(BridgeError::InvalidInput(format!(
                "{} {} does not take a resource id (got {id})",
                self.method, self.path_template
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: EndpointDescriptor = EndpointDescriptor {
        method: HttpMethod::Get,
        path_template: "/clients/{id}.json",
        body_key: None,
        accepts_query: false,
        fixed_query: &[],
    };

    #[test]
    fn test_http_method_wire_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_carries_body() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(HttpMethod::Patch.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
    }

    #[test]
    fn test_resolve_path_with_id() {
        assert_eq!(SAMPLE.resolve_path(Some(17)).unwrap(), "/clients/17.json");
    }

    #[test]
    fn test_resolve_path_missing_id() {
        let result = SAMPLE.resolve_path(None);
        assert!(matches!(result, Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_path_unexpected_id() {
        let descriptor = EndpointDescriptor { path_template: "/clients.json", ..SAMPLE };
        assert!(!descriptor.requires_id());
        assert_eq!(descriptor.resolve_path(None).unwrap(), "/clients.json");
        assert!(matches!(descriptor.resolve_path(Some(1)), Err(BridgeError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_path_nested_template() {
        let descriptor =
            EndpointDescriptor { path_template: "/invoices/{id}/send_by_email.json", ..SAMPLE };
        assert_eq!(descriptor.resolve_path(Some(5)).unwrap(), "/invoices/5/send_by_email.json");
    }
}
