//! Default HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use rush_types::{
    HttpTransport, RequestBody, RushError, TransportRequest, TransportResponse, traits::Result,
};

/// Sends composed requests over a `reqwest` client.
///
/// Every status code is returned to the caller; only network-level failures
/// become [`RushError::Http`].
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport wrapping the given HTTP client.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Returns a reference to the inner HTTP client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.http
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| RushError::Http(e.to_string()))?;

        let mut builder = self.http.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Query(pairs) => builder.query(pairs),
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok(TransportResponse::new(status, body))
    }
}
