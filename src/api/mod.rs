use serde_json::Value;

use crate::error::Error;
use crate::ApiResponse;

pub mod itineraries;
pub mod token;

/// Joins the `errors` array of a failed reply with `", "`.
///
/// A body that is not JSON, or has no `errors` array, gives an empty string.
pub(crate) fn joined_errors(body: &str) -> String {
    let Ok(reply) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };

    reply
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|e| match e {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

/// Error for a non-200 reply while getting `what`.
pub(crate) fn status_error(what: &str, response: &ApiResponse) -> Error {
    tracing::debug!(status = response.status, "provider rejected request for {}", what);
    Error::Protocol(format!(
        "Error getting {}: {}",
        what,
        joined_errors(&response.body)
    ))
}
