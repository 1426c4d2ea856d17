//! Error types for the Fakturownia MCP bridge.
//!
//! This module defines every failure a logical call can end in. All errors
//! implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Exhausted retries** ([`BridgeError::RetriesExhausted`], [`BridgeError::Timeout`]):
//!   rate limiting, server faults or attempt timeouts that persisted through every attempt
//! - **Fatal responses** ([`BridgeError::Api`]): any other non-success HTTP status
//! - **Transport faults** ([`BridgeError::HttpError`], [`BridgeError::InvalidResponse`]):
//!   DNS, connection and body decoding failures
//! - **Caller and setup errors** ([`BridgeError::InvalidInput`], [`BridgeError::ConfigError`],
//!   [`BridgeError::UnknownOperation`])
//!
//! # Examples
//!
//! ```
//! use fakturownia_mcp_bridge::error::{BridgeError, Result};
//!
//! fn parse_id(raw: &str) -> Result<u64> {
//!     raw.parse().map_err(|_| BridgeError::InvalidInput(format!("not an id: {raw}")))
//! }
//!
//! assert!(parse_id("42").is_ok());
//! assert!(parse_id("abc").is_err());
//! ```

use std::time::Duration;

use thiserror::Error;

use crate::endpoint::HttpMethod;

/// Result type alias for bridge operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in the Fakturownia MCP bridge.
///
/// Every variant that stems from a network exchange carries the verb and path of
/// the operation so the caller can render a self-contained message.
///
/// # Error Recovery
///
/// - **Exhausted** ([`RetriesExhausted`](Self::RetriesExhausted), [`Timeout`](Self::Timeout)):
///   the service was unavailable for the whole retry window; retrying later may succeed
/// - **Fatal** ([`Api`](Self::Api)): fix the request (payload, id, permissions) first
/// - **Transport** ([`HttpError`](Self::HttpError)): check connectivity and the configured domain
/// - **Setup** ([`ConfigError`](Self::ConfigError)): fix the environment and restart
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Rate limiting or server errors persisted through every allowed attempt.
    ///
    /// Carries the status and body of the last response received.
    #[error(
        "Fakturownia API error {status} after {attempts} attempts ({method} {path}): {body}"
    )]
    RetriesExhausted {
        /// HTTP verb of the operation.
        method: HttpMethod,
        /// Resolved request path.
        path: String,
        /// Number of attempts made.
        attempts: u32,
        /// Status code of the last response.
        status: u16,
        /// Body text of the last response.
        body: String,
    },

    /// The last allowed attempt did not complete within the configured bound.
    #[error("Fakturownia API request timed out after {}ms: {method} {path}", .timeout.as_millis())]
    Timeout {
        /// HTTP verb of the operation.
        method: HttpMethod,
        /// Resolved request path.
        path: String,
        /// Configured per-attempt timeout.
        timeout: Duration,
    },

    /// The service answered with a non-retryable, non-success status.
    ///
    /// Covers every 4xx except 429. These are never retried because repeating
    /// the same request cannot change the answer.
    #[error("Fakturownia API error {status} ({method} {path}): {body}")]
    Api {
        /// HTTP verb of the operation.
        method: HttpMethod,
        /// Resolved request path.
        path: String,
        /// Response status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// HTTP request failed at the transport level.
    ///
    /// This error wraps [`reqwest::Error`]. Common causes include DNS resolution
    /// failures, refused or reset connections and TLS errors.
    ///
    /// The request URL is stripped on conversion, since query strings carry the
    /// API token.
    #[error("HTTP request failed: {0}")]
    HttpError(#[source] reqwest::Error),

    /// A successful response declared JSON but its body could not be decoded.
    #[error("Invalid response body ({method} {path}): {reason}")]
    InvalidResponse {
        /// HTTP verb of the operation.
        method: HttpMethod,
        /// Resolved request path.
        path: String,
        /// Decoder error.
        reason: String,
    },

    /// Invalid input supplied by the caller.
    ///
    /// Raised for payloads that are not JSON objects, ids given to operations that
    /// take none (or missing where required), and query parameters sent to an
    /// operation that does not accept them.
    ///
    /// # Examples
    ///
    /// ```
    /// use fakturownia_mcp_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::InvalidInput("invoice must be a JSON object".to_owned());
    /// assert_eq!(err.to_string(), "Invalid input: invoice must be a JSON object");
    /// ```
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration is missing or invalid.
    ///
    /// Raised at startup, never during a call.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No endpoint is registered under the requested operation name.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl From<reqwest::Error> for BridgeError {
    fn from(error: reqwest::Error) -> Self {
        Self::HttpError(error.without_url())
    }
}
