//! Async traits shared across all uber-rush crates.
//!
//! The HTTP transport is the one seam between the SDK core and the network.
//! The client crate ships a `reqwest`-backed implementation; tests substitute
//! an in-memory one.

use crate::RushError;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use serde_json::Value;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RushError>;

/// Payload attached to an outgoing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    None,
    /// Query-string pairs appended to the URL.
    Query(Vec<(String, String)>),
    /// JSON request body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
}

/// One fully composed HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl TransportRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw status and body returned by the transport.
///
/// Non-2xx statuses are returned as-is; interpreting them is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Http`] when the exchange fails at the network
    /// level. HTTP error statuses are not errors at this layer.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}
