//! Shared request helpers for the tool functions.
//!
//! Tools translate their parameters into a [`RequestIntent`] through these
//! helpers and hand it to the shared [`RequestExecutor`].

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::{
    endpoint::Operation,
    error::{BridgeError, Result},
    transport::{DecodedResponse, RequestExecutor, RequestIntent},
};

/// Builds and executes the intent for one operation.
///
/// `payload` is wrapped under the operation's body key; operations that carry
/// a body but take no payload send `{}`.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] for ids, query parameters or payloads
/// the operation does not accept, and any error of
/// [`RequestExecutor::execute`].
#[instrument(skip(executor, query, payload), fields(operation = operation.name()))]
pub async fn execute_operation(
    executor: &RequestExecutor,
    operation: Operation,
    id: Option<u64>,
    query: Vec<(String, String)>,
    payload: Option<Value>,
) -> Result<DecodedResponse> {
    let intent = build_intent(operation, id, query, payload)?;
    executor.execute(&intent).await
}

/// Assembles the intent without touching the network.
///
/// # Errors
///
/// See [`execute_operation`].
pub fn build_intent(
    operation: Operation,
    id: Option<u64>,
    query: Vec<(String, String)>,
    payload: Option<Value>,
) -> Result<RequestIntent> {
    let intent = RequestIntent::for_operation(operation, id)?.with_query(query)?;
    match payload {
        Some(payload) => intent.with_payload(payload),
        None if operation.descriptor().method.carries_body() => {
            intent.with_body(serde_json::Map::new())
        }
        None => Ok(intent),
    }
}

/// Normalizes a payload given either as a JSON object or as a string holding one.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if the string is not valid JSON or the
/// value is not an object.
pub fn parse_payload(field: &str, value: Value) -> Result<Value> {
    let parsed = match value {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| BridgeError::InvalidInput(format!("{field} is not valid JSON: {e}")))?,
        other => other,
    };
    if !parsed.is_object() {
        return Err(BridgeError::InvalidInput(format!("{field} must be a JSON object")));
    }
    Ok(parsed)
}

/// Flattens a parameter struct into query pairs.
///
/// Absent (`null`) fields are skipped; strings are sent verbatim and every
/// other scalar in its JSON form.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidInput`] if `params` does not serialize to a
/// flat JSON object.
pub fn query_from_params<T: Serialize>(params: &T) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params)
        .map_err(|e| BridgeError::InvalidInput(format!("cannot encode parameters: {e}")))?;
    let Value::Object(fields) = value else {
        return Err(BridgeError::InvalidInput("parameters must be an object".to_owned()));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        match value {
            Value::Null => {}
            Value::String(text) => pairs.push((key, text)),
            Value::Bool(_) | Value::Number(_) => pairs.push((key, value.to_string())),
            Value::Array(_) | Value::Object(_) => {
                return Err(BridgeError::InvalidInput(format!(
                    "parameter {key} must be a scalar"
                )));
            }
        }
    }
    Ok(pairs)
}
