//! Unified error type for the uber-rush workspace.

use serde_json::{Map, Value};
use thiserror::Error;

/// Boxed cause attached to a generic [`RushError::Api`] failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Enumerates all error kinds surfaced by the SDK.
///
/// The first five variants are what resource operations return. The
/// remaining ones are raw transport outcomes produced by
/// `ApiClient::request` before they are translated at the resource boundary.
#[derive(Debug, Error)]
pub enum RushError {
    /// A required credential was missing when the client was built.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An authenticated call was attempted before a token was set.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The remote API rejected one or more request fields (HTTP 422).
    #[error("{message}")]
    Validation {
        message: String,
        invalid_params: Map<String, Value>,
    },

    /// Any other remote, transport, or parse failure.
    #[error("{message}")]
    Api {
        message: String,
        code: u16,
        #[source]
        source: Option<Cause>,
    },

    /// The call succeeded but the body decoded to nothing.
    #[error("Empty body response")]
    EmptyResponse,

    /// The remote answered with a 4xx status.
    #[error("client error: status={status}, body={body}")]
    Client { status: u16, body: String },

    /// The remote answered with a 5xx status.
    #[error("server error: status={status}, body={body}")]
    Server { status: u16, body: String },

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for RushError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl RushError {
    /// Builds a generic API error without a cause.
    pub fn api(message: impl Into<String>, code: u16) -> Self {
        Self::Api {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Numeric code: the HTTP status where one is known, otherwise 0.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Api { code, .. } => *code,
            Self::Validation { .. } => 422,
            Self::Client { status, .. } | Self::Server { status, .. } => *status,
            _ => 0,
        }
    }

    /// Field-level validation details, present only for non-empty 422 payloads.
    #[must_use]
    pub fn invalid_params(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Validation { invalid_params, .. } if !invalid_params.is_empty() => {
                Some(invalid_params)
            }
            _ => None,
        }
    }
}
