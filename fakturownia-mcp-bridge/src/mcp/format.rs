//! Text rendering of tool results.

use crate::{error::BridgeError, transport::DecodedResponse};

/// Renders a successful payload: JSON pretty-printed with two-space indent,
/// text verbatim.
#[must_use]
pub fn render_success(response: &DecodedResponse) -> String {
    match response {
        DecodedResponse::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        DecodedResponse::Text(text) => text.clone(),
    }
}

/// Renders a failure as shown to the agent.
#[must_use]
pub fn render_error(error: &BridgeError) -> String {
    format!("Error: {error}")
}
