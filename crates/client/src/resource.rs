//! Per-call request composition and error translation shared by resources.

use http::Method;
use rush_types::{RushError, traits::Result};
use serde_json::{Map, Value};

use crate::ApiClient;

/// Method, endpoint and parameters of one resource call.
///
/// Built fresh by every public operation; nothing carries over between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub method: Method,
    pub endpoint: String,
    pub params: Map<String, Value>,
}

impl ResourceRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Map::new(),
        }
    }

    /// Appends a percent-encoded path segment, e.g. an id or an action name.
    #[must_use]
    pub fn segment(mut self, segment: &str) -> Self {
        self.endpoint.push('/');
        self.endpoint.push_str(&urlencoding::encode(segment));
        self
    }

    #[must_use]
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Dispatches through `client`, translating failures and rejecting an
    /// empty body.
    ///
    /// # Errors
    ///
    /// See [`translate`]; additionally [`RushError::EmptyResponse`] when the
    /// body decodes to nothing.
    pub async fn send(self, client: &ApiClient) -> Result<Value> {
        let value = client
            .request(self.method, &self.endpoint, &self.params)
            .await
            .map_err(translate)?;
        if value.is_null() {
            return Err(RushError::EmptyResponse);
        }
        Ok(value)
    }
}

/// Maps raw dispatch failures onto the public error taxonomy.
///
/// - 422 with `meta.message` → [`RushError::Validation`] carrying `meta.fields`
/// - any other 4xx → [`RushError::Api`] with the status as code
/// - transport, server and parse failures → [`RushError::Api`] with the cause
///
/// Already-translated errors and authentication/configuration errors pass
/// through unchanged.
#[must_use]
pub fn translate(err: RushError) -> RushError {
    match err {
        RushError::Client { status: 422, ref body } => match validation_failure(body) {
            Some(validation) => validation,
            None => wrap(err),
        },
        RushError::Client { .. }
        | RushError::Server { .. }
        | RushError::Http(_)
        | RushError::Serialization(_) => wrap(err),
        passthrough => passthrough,
    }
}

fn validation_failure(body: &str) -> Option<RushError> {
    let json: Value = serde_json::from_str(body).ok()?;
    let meta = json.get("meta")?;
    let message = meta.get("message")?.as_str()?.to_string();
    let invalid_params = meta
        .get("fields")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Some(RushError::Validation {
        message,
        invalid_params,
    })
}

fn wrap(err: RushError) -> RushError {
    RushError::Api {
        message: err.to_string(),
        code: err.code(),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segment_builds_endpoint() {
        let req = ResourceRequest::new(Method::POST, "deliveries")
            .segment("abc")
            .segment("cancel");
        assert_eq!(req.endpoint, "deliveries/abc/cancel");
        assert!(req.params.is_empty());
    }

    #[test]
    fn test_segment_escapes_path_and_query_characters() {
        let req = ResourceRequest::new(Method::GET, "deliveries").segment("abc/cancel?x=1");
        assert_eq!(req.endpoint, "deliveries/abc%2Fcancel%3Fx%3D1");
    }

    #[test]
    fn test_translate_validation() {
        let err = translate(RushError::Client {
            status: 422,
            body: r#"{"meta":{"code":"validation_failed","message":"bad field","fields":{"pickup":"required"}}}"#.into(),
        });
        let RushError::Validation {
            message,
            invalid_params,
        } = err
        else {
            panic!("expected validation error");
        };
        assert_eq!(message, "bad field");
        assert_eq!(Value::Object(invalid_params), json!({"pickup": "required"}));
    }

    #[test]
    fn test_translate_422_without_meta_is_generic() {
        let err = translate(RushError::Client {
            status: 422,
            body: "unprocessable".into(),
        });
        assert!(matches!(err, RushError::Api { code: 422, .. }));
    }

    #[test]
    fn test_translate_other_client_error() {
        let err = translate(RushError::Client {
            status: 404,
            body: r#"{"message":"not found"}"#.into(),
        });
        assert!(matches!(err, RushError::Api { code: 404, .. }));
        assert!(err.message().contains("404"));
    }

    #[test]
    fn test_translate_transport_failure() {
        let err = translate(RushError::Http("connection refused".into()));
        let RushError::Api { message, code, source } = err else {
            panic!("expected api error");
        };
        assert!(message.contains("connection refused"));
        assert_eq!(code, 0);
        assert!(source.is_some());
    }

    #[test]
    fn test_translate_passthrough() {
        let err = translate(RushError::Authentication("Access Token is not set.".into()));
        assert!(matches!(err, RushError::Authentication(_)));
        let err = translate(RushError::EmptyResponse);
        assert!(matches!(err, RushError::EmptyResponse));
    }
}
