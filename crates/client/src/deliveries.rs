//! The `deliveries` resource.
//!
//! Payloads are passed through untouched; the remote API is the validator.
//! See <https://developer.uber.com/docs/deliveries/references/api/v1>.

use http::Method;
use rush_types::{RushError, traits::Result};
use serde_json::{Map, Value};

use crate::{ApiClient, ResourceRequest};

const ENDPOINT: &str = "deliveries";

/// Typed operations on deliveries, bound to an [`ApiClient`].
#[derive(Debug, Clone, Copy)]
pub struct Deliveries<'a> {
    client: &'a ApiClient,
}

impl<'a> Deliveries<'a> {
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Creates a delivery. `params` is sent as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Validation`] when the remote rejects fields, and
    /// the other translated errors described on [`crate::resource::translate`].
    pub async fn create(&self, params: Value) -> Result<Value> {
        ResourceRequest::new(Method::POST, ENDPOINT)
            .params(object(params)?)
            .send(self.client)
            .await
    }

    /// Lists deliveries. `filter` is sent as the query string.
    ///
    /// # Errors
    ///
    /// Returns a translated error if the call fails or the body is empty.
    pub async fn list(&self, filter: Value) -> Result<Value> {
        ResourceRequest::new(Method::GET, ENDPOINT)
            .params(object(filter)?)
            .send(self.client)
            .await
    }

    /// Fetches one delivery.
    ///
    /// # Errors
    ///
    /// A missing delivery surfaces as [`RushError::Api`] with code 404.
    pub async fn get(&self, delivery_id: &str) -> Result<Value> {
        ResourceRequest::new(Method::GET, ENDPOINT)
            .segment(delivery_id)
            .send(self.client)
            .await
    }

    /// Cancels a delivery.
    ///
    /// # Errors
    ///
    /// Returns a translated error if the call fails or the body is empty.
    pub async fn cancel(&self, delivery_id: &str) -> Result<Value> {
        ResourceRequest::new(Method::POST, ENDPOINT)
            .segment(delivery_id)
            .segment("cancel")
            .send(self.client)
            .await
    }
}

fn object(params: Value) -> Result<Map<String, Value>> {
    match params {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(RushError::api(
            format!("delivery parameters must be a JSON object, got {other}"),
            0,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use rush_config::ClientConfig;
    use rush_types::{AccessToken, RequestBody};
    use serde_json::json;
    use std::sync::Arc;

    fn make_client(transport: &Arc<RecordingTransport>) -> ApiClient {
        let client = ApiClient::with_transport(
            ClientConfig::new("rush-id", "rush-secret"),
            transport.clone(),
        )
        .unwrap();
        client.set_access_token(AccessToken::new("tok", 3600));
        client
    }

    #[tokio::test]
    async fn test_create_posts_body() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"delivery_id": "d-1", "status": "processing"}));
        let client = make_client(&transport);

        let params = json!({"order_reference_id": "r-1", "items": [{"title": "Shoes"}]});
        let resp = client.deliveries().create(params.clone()).await.unwrap();
        assert_eq!(resp["delivery_id"], "d-1");

        let reqs = transport.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].method, Method::POST);
        assert_eq!(reqs[0].url, "https://api.uber.com/v1/deliveries");
        assert_eq!(reqs[0].body, RequestBody::Json(params));
    }

    #[tokio::test]
    async fn test_create_validation_failure() {
        let transport = RecordingTransport::new();
        transport.respond(
            422,
            r#"{"meta":{"message":"bad field","fields":{"pickup":"required"}}}"#,
        );
        let client = make_client(&transport);

        let err = client.deliveries().create(json!({})).await.unwrap_err();
        assert!(matches!(err, RushError::Validation { .. }));
        assert_eq!(err.message(), "bad field");
        assert_eq!(
            err.invalid_params().cloned().map(Value::Object),
            Some(json!({"pickup": "required"}))
        );
    }

    #[tokio::test]
    async fn test_create_rejects_non_object_params() {
        let transport = RecordingTransport::new();
        let client = make_client(&transport);
        let err = client.deliveries().create(json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, RushError::Api { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_filter_as_query() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"count": 1, "deliveries": [{"id": "abc"}]}));
        let client = make_client(&transport);

        let resp = client
            .deliveries()
            .list(json!({"limit": 10, "offset": 0}))
            .await
            .unwrap();
        assert_eq!(resp["count"], 1);

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, "https://api.uber.com/v1/deliveries");
        let RequestBody::Query(pairs) = &req.body else {
            panic!("expected query, got {:?}", req.body);
        };
        assert!(pairs.contains(&("limit".into(), "10".into())));
        assert!(pairs.contains(&("offset".into(), "0".into())));
    }

    #[tokio::test]
    async fn test_list_without_filter_sends_no_query() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"count": 0, "deliveries": []}));
        let client = make_client(&transport);

        client.deliveries().list(Value::Null).await.unwrap();
        assert_eq!(transport.requests()[0].body, RequestBody::None);
    }

    #[tokio::test]
    async fn test_get_returns_body_unchanged() {
        let transport = RecordingTransport::new();
        let body = json!({"id": "abc", "status": "completed"});
        transport.respond_json(200, &body);
        let client = make_client(&transport);

        let resp = client.deliveries().get("abc").await.unwrap();
        assert_eq!(resp, body);

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, "https://api.uber.com/v1/deliveries/abc");
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_escapes_delivery_id() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"id": "a/b"}));
        let client = make_client(&transport);

        client.deliveries().get("a/b?c").await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "https://api.uber.com/v1/deliveries/a%2Fb%3Fc"
        );
    }

    #[tokio::test]
    async fn test_get_not_found_is_generic() {
        let transport = RecordingTransport::new();
        transport.respond(404, r#"{"message":"delivery not found"}"#);
        let client = make_client(&transport);

        let err = client.deliveries().get("missing").await.unwrap_err();
        assert!(matches!(err, RushError::Api { code: 404, .. }));
        assert!(err.invalid_params().is_none());
    }

    #[tokio::test]
    async fn test_cancel_posts_once_without_body() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"id": "abc", "status": "client_canceled"}));
        let client = make_client(&transport);

        client.deliveries().cancel("abc").await.unwrap();

        let reqs = transport.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].method, Method::POST);
        assert_eq!(reqs[0].url, "https://api.uber.com/v1/deliveries/abc/cancel");
        assert_eq!(reqs[0].body, RequestBody::None);
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_response() {
        let transport = RecordingTransport::new();
        transport.respond(200, "");
        transport.respond(200, "null");
        let client = make_client(&transport);

        let err = client.deliveries().get("abc").await.unwrap_err();
        assert!(matches!(err, RushError::EmptyResponse));
        let err = client.deliveries().cancel("abc").await.unwrap_err();
        assert!(matches!(err, RushError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_operations_without_token_fail_before_network() {
        let transport = RecordingTransport::new();
        let client = ApiClient::with_transport(
            ClientConfig::new("rush-id", "rush-secret"),
            transport.clone(),
        )
        .unwrap();
        let deliveries = client.deliveries();

        let results = [
            deliveries.create(json!({"a": 1})).await,
            deliveries.list(json!({})).await,
            deliveries.get("abc").await,
            deliveries.cancel("abc").await,
        ];
        for result in results {
            assert!(matches!(result, Err(RushError::Authentication(_))));
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_with_cause() {
        let transport = RecordingTransport::new();
        transport.fail(RushError::Http("connection reset".into()));
        let client = make_client(&transport);

        let err = client.deliveries().get("abc").await.unwrap_err();
        assert!(matches!(err, RushError::Api { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_server_error_is_generic() {
        let transport = RecordingTransport::new();
        transport.respond(503, "unavailable");
        let client = make_client(&transport);

        let err = client.deliveries().list(json!({})).await.unwrap_err();
        assert!(matches!(err, RushError::Api { code: 503, .. }));
    }

    #[tokio::test]
    async fn test_sandbox_routes_to_sandbox_host() {
        let transport = RecordingTransport::new();
        transport.respond_json(200, &json!({"id": "abc"}));
        let client = ApiClient::with_transport(
            ClientConfig::new("rush-id", "rush-secret").with_sandbox(true),
            transport.clone(),
        )
        .unwrap();
        client.set_access_token(AccessToken::new("tok", 0));

        client.deliveries().get("abc").await.unwrap();
        assert_eq!(
            transport.requests()[0].url,
            "https://sandbox-api.uber.com/v1/deliveries/abc"
        );
    }
}
