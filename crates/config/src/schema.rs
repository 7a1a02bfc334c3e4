use rush_types::RushError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for configuration read from the environment.
pub const ENV_PREFIX: &str = "UBER_RUSH_";

fn default_grant_type() -> String {
    "client_credentials".to_string()
}
fn default_scope() -> String {
    "delivery".to_string()
}

/// Credentials and options for the API client.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// OAuth client secret (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    /// OAuth client id (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// OAuth grant type (defaults to `client_credentials`).
    #[serde(default = "default_grant_type")]
    pub grant_type: String,
    /// Requested scope (defaults to `delivery`).
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Route requests to the sandbox environment (defaults to `false`).
    #[serde(default)]
    pub sandbox: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_secret: None,
            client_id: None,
            grant_type: default_grant_type(),
            scope: default_scope(),
            sandbox: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("client_id", &self.client_id)
            .field("grant_type", &self.grant_type)
            .field("scope", &self.scope)
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with the given credentials and default options.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    #[must_use]
    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(path))
            .extract()
    }

    /// Loads configuration from `UBER_RUSH_*` environment variables, merged
    /// with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if a variable has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Serialized},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// Checks that both credentials are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RushError::Configuration`] naming the first missing credential.
    pub fn validate(&self) -> Result<(), RushError> {
        if is_blank(self.client_secret.as_deref()) {
            return Err(RushError::Configuration(
                "client_secret not provided.".into(),
            ));
        }
        if is_blank(self.client_id.as_deref()) {
            return Err(RushError::Configuration("client_id not provided.".into()));
        }
        Ok(())
    }

    /// Form parameters sent to the token endpoint.
    #[must_use]
    pub fn form_params(&self) -> Vec<(String, String)> {
        vec![
            (
                "client_secret".into(),
                self.client_secret.clone().unwrap_or_default(),
            ),
            ("client_id".into(), self.client_id.clone().unwrap_or_default()),
            ("grant_type".into(), self.grant_type.clone()),
            ("scope".into(), self.scope.clone()),
            (
                "sandbox".into(),
                if self.sandbox { "1" } else { "0" }.into(),
            ),
        ]
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}
