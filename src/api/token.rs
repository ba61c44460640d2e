use serde_json::Value;

use crate::error::{Error, Result};
use crate::ApiClient;

pub const TOKEN_URL: &str = "/api/v1/pull/token";

/// Asks the provider for a token. The credentials travel as headers, so
/// the request itself has no query string.
pub fn fetch_token(client: &dyn ApiClient) -> Result<String> {
    let response = client.http_get(TOKEN_URL, &[])?;

    if response.status != 200 {
        return Err(super::status_error("token", &response));
    }

    // A token that is absent, null, empty or not a string counts as missing
    let reply: Value = serde_json::from_str(&response.body)?;
    match reply.get("token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(Error::Protocol(
            "Token not found in response JSON".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::CannedClient;

    #[test]
    fn returns_token_from_ok_reply() {
        let client = CannedClient::new(200, r#"{"token":"T1"}"#);

        assert_eq!(fetch_token(&client).unwrap(), "T1");

        let calls = client.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, TOKEN_URL);
        assert!(calls[0].1.is_empty());
    }

    #[test]
    fn missing_token_is_a_protocol_error() {
        let client = CannedClient::new(200, r#"{"status":"ok"}"#);
        let err = fetch_token(&client).unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(err.to_string(), "Token not found in response JSON");
    }

    #[test]
    fn empty_or_null_token_is_a_protocol_error() {
        for body in [r#"{"token":""}"#, r#"{"token":null}"#] {
            let client = CannedClient::new(200, body);
            let err = fetch_token(&client).unwrap_err();

            assert_eq!(err.to_string(), "Token not found in response JSON");
        }
    }

    #[test]
    fn non_string_token_is_a_protocol_error() {
        for body in [r#"{"token":123}"#, r#"{"token":["T1"]}"#, "[]"] {
            let client = CannedClient::new(200, body);
            let err = fetch_token(&client).unwrap_err();

            assert!(matches!(err, Error::Protocol(_)));
            assert_eq!(err.to_string(), "Token not found in response JSON");
        }
    }

    #[test]
    fn rejected_request_reports_provider_errors() {
        let client = CannedClient::new(401, r#"{"errors":["invalid client"]}"#);
        let err = fetch_token(&client).unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(err.to_string(), "Error getting token: invalid client");
    }

    #[test]
    fn rejected_request_without_errors_has_empty_message() {
        let client = CannedClient::new(403, "{}");
        let err = fetch_token(&client).unwrap_err();

        assert_eq!(err.to_string(), "Error getting token: ");
    }

    #[test]
    fn ok_reply_that_is_not_json_is_a_decode_error() {
        let client = CannedClient::new(200, "not json");

        assert!(matches!(fetch_token(&client), Err(Error::Json(_))));
    }
}
