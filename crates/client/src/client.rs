//! Authenticated access to the UberRUSH REST API.
//!
//! [`ApiClient`] owns the configuration, the current [`AccessToken`], and the
//! transport. It builds request URLs and headers, fetches tokens through the
//! client-credentials grant, and dispatches generic requests. Typed resource
//! surfaces such as [`Deliveries`] sit on top of it.

use arc_swap::ArcSwapOption;
use http::Method;
use rush_config::ClientConfig;
use rush_types::{
    AccessToken, HttpTransport, RequestBody, RushError, TransportRequest, TransportResponse,
    traits::Result,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{Deliveries, query, resource, transport::ReqwestTransport};

pub const API_HOST: &str = "api.uber.com";
pub const API_VERSION: &str = "v1";
pub const SANDBOX_PREFIX: &str = "sandbox-";
pub const TOKEN_URL: &str = "https://login.uber.com/oauth/v2/token";

/// Single point of authenticated communication with the remote API.
///
/// The current token is swapped atomically, so one client may be shared
/// across tasks; a concurrent [`fetch_access_token`](Self::fetch_access_token)
/// is observed by readers as either the old or the new token.
pub struct ApiClient {
    config: ClientConfig,
    sandbox: bool,
    token: ArcSwapOption<AccessToken>,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("sandbox", &self.sandbox)
            .field("has_token", &self.token.load().is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Configuration`] if `client_secret` or `client_id`
    /// is missing.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::default()))
    }

    /// Creates a client dispatching through the given transport.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Configuration`] if `client_secret` or `client_id`
    /// is missing.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sandbox: config.sandbox,
            config,
            token: ArcSwapOption::empty(),
            transport,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn set_sandbox(&mut self, mode: bool) {
        self.sandbox = mode;
    }

    /// Returns the current token, if one has been fetched or set.
    #[must_use]
    pub fn access_token(&self) -> Option<Arc<AccessToken>> {
        self.token.load_full()
    }

    /// Replaces the current token.
    pub fn set_access_token(&self, token: AccessToken) {
        self.token.store(Some(Arc::new(token)));
    }

    /// Requests a new token from the OAuth endpoint and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Api`] on transport failure, an error status, or a
    /// response without `access_token`.
    pub async fn fetch_access_token(&self) -> Result<AccessToken> {
        let mut req = TransportRequest::new(Method::POST, TOKEN_URL);
        req.headers
            .push(("Accept".into(), "application/json".into()));
        req.body = RequestBody::Form(self.config.form_params());

        tracing::debug!(url = TOKEN_URL, sandbox = self.sandbox, "requesting access token");
        let json = self
            .send(req)
            .await
            .map_err(resource::translate)?;

        let value = json
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| RushError::api("missing access_token in token response", 0))?;
        let expires_in = json
            .get("expires_in")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let token = AccessToken::new(value, expires_in);
        self.set_access_token(token.clone());
        Ok(token)
    }

    /// Full URL for an API path, honouring sandbox mode.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "https://{}{API_HOST}/{API_VERSION}/{}",
            if self.sandbox { SANDBOX_PREFIX } else { "" },
            path.trim_start_matches('/')
        )
    }

    /// Headers attached to every resource request.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Authentication`] if no token has been set.
    pub fn build_headers(&self) -> Result<Vec<(String, String)>> {
        let token = self
            .token
            .load_full()
            .ok_or_else(|| RushError::Authentication("Access Token is not set.".into()))?;
        Ok(vec![
            ("Authorization".into(), format!("Bearer {}", token.value())),
            ("Content-Type".into(), "application/json".into()),
        ])
    }

    /// Dispatches a request to `path` and decodes the JSON response.
    ///
    /// Non-empty `params` become the query string for GET and the JSON body
    /// for POST; other methods send no payload. An empty response body
    /// decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Authentication`] before any network call if no
    /// token is set, [`RushError::Client`] / [`RushError::Server`] for 4xx /
    /// 5xx statuses, [`RushError::Http`] for transport failures and
    /// [`RushError::Serialization`] for a malformed body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        let headers = self.build_headers()?;
        let url = self.build_url(path);

        let body = if params.is_empty() {
            RequestBody::None
        } else if method == Method::GET {
            RequestBody::Query(query::encode(params))
        } else if method == Method::POST {
            RequestBody::Json(Value::Object(params.clone()))
        } else {
            RequestBody::None
        };

        tracing::debug!(method = %method, url = %url, "dispatching request");
        self.send(TransportRequest {
            method,
            url,
            headers,
            body,
        })
        .await
    }

    /// Returns the delivery resource bound to this client.
    #[must_use]
    pub fn deliveries(&self) -> Deliveries<'_> {
        Deliveries::new(self)
    }

    async fn send(&self, req: TransportRequest) -> Result<Value> {
        let resp = self.transport.send(req).await?;
        decode(&resp)
    }
}

fn decode(resp: &TransportResponse) -> Result<Value> {
    let status = resp.status;
    if (400..500).contains(&status) {
        return Err(RushError::Client {
            status,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
        });
    }
    if status >= 500 {
        return Err(RushError::Server {
            status,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
        });
    }
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&resp.body)?)
}
