use serde_json::Value;

use crate::error::{Error, Result};
use crate::ApiClient;

pub struct Itineraries<'a> {
    client: &'a dyn ApiClient,
}

impl<'a> Itineraries<'a> {
    const URL: &'static str = "/api/v1/pull/itineraries";

    pub fn new(client: &'a dyn ApiClient) -> Self {
        Self { client }
    }

    /// Returns the raw `itineraries` value of the reply, or an empty list when
    /// the field is absent. Its shape is checked by [`crate::record::normalize`].
    ///
    /// The whole result set comes back in this one reply.
    pub fn fetch(&self, token: &str) -> Result<Value> {
        let qs = vec![("token".to_string(), token.to_string())];

        let response = self.client.http_get(Itineraries::URL, &qs)?;
        if response.status != 200 {
            return Err(super::status_error("itineraries", &response));
        }

        let reply: Value = serde_json::from_str(&response.body)?;
        match reply {
            Value::Object(mut fields) => Ok(fields
                .remove("itineraries")
                .unwrap_or_else(|| Value::Array(vec![]))),
            _ => Err(Error::Protocol(
                "Unexpected itineraries reply: expected a JSON object".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::testing::CannedClient;

    #[test]
    fn sends_token_as_query_parameter() {
        let client = CannedClient::new(200, r#"{"itineraries":[]}"#);
        Itineraries::new(&client).fetch("T1").unwrap();

        let calls = client.calls.borrow();
        assert_eq!(calls[0].0, "/api/v1/pull/itineraries");
        assert_eq!(calls[0].1, vec![("token".to_string(), "T1".to_string())]);
    }

    #[test]
    fn returns_itineraries_field() {
        let client = CannedClient::new(200, r#"{"itineraries":[{"guid":"g1","name":"Trip"}]}"#);
        let itineraries = Itineraries::new(&client).fetch("T1").unwrap();

        assert_eq!(itineraries, json!([{"guid": "g1", "name": "Trip"}]));
    }

    #[test]
    fn absent_field_is_an_empty_list() {
        let client = CannedClient::new(200, r#"{"count":0}"#);
        let itineraries = Itineraries::new(&client).fetch("T1").unwrap();

        assert_eq!(itineraries, json!([]));
    }

    #[test]
    fn non_list_field_is_passed_through() {
        let client = CannedClient::new(200, r#"{"itineraries":"none"}"#);
        let itineraries = Itineraries::new(&client).fetch("T1").unwrap();

        assert_eq!(itineraries, json!("none"));
    }

    #[test]
    fn rejected_request_reports_provider_errors() {
        let client = CannedClient::new(401, r#"{"errors":["token expired","retry later"]}"#);
        let err = Itineraries::new(&client).fetch("T1").unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
        assert_eq!(
            err.to_string(),
            "Error getting itineraries: token expired, retry later"
        );
    }

    #[test]
    fn reply_that_is_not_an_object_is_rejected() {
        let client = CannedClient::new(200, "[1,2,3]");
        let err = Itineraries::new(&client).fetch("T1").unwrap_err();

        assert!(matches!(err, Error::Protocol(_)));
    }
}
