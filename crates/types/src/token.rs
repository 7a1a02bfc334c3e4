//! OAuth access token representation and expiry logic.

use std::{
    fmt,
    time::{Duration, SystemTime},
};

/// A bearer token issued by the client-credentials grant.
///
/// Tokens are immutable; a later token fetch supersedes the previous value
/// instead of mutating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Option<SystemTime>,
}

impl AccessToken {
    /// Create a token expiring `expires_in_secs` seconds from now.
    ///
    /// A zero lifetime, or one too large to represent as an instant, means
    /// the expiry is unknown.
    pub fn new(value: impl Into<String>, expires_in_secs: u64) -> Self {
        let expires_at = (expires_in_secs > 0)
            .then(|| SystemTime::now().checked_add(Duration::from_secs(expires_in_secs)))
            .flatten();
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Create a token with an explicit absolute expiry.
    pub fn with_expires_at(value: impl Into<String>, expires_at: Option<SystemTime>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// The bearer credential.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// Whether the token has expired.
    ///
    /// Returns `None` when the expiry is unknown; callers treat such a token
    /// as usable.
    #[must_use]
    pub fn is_expired(&self) -> Option<bool> {
        self.is_expired_at(SystemTime::now())
    }

    /// Evaluates expiry against the given instant.
    #[must_use]
    pub fn is_expired_at(&self, now: SystemTime) -> Option<bool> {
        self.expires_at.map(|at| at < now)
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
