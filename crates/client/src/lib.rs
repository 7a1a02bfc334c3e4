//! UberRUSH API client.
//!
//! [`ApiClient`] handles the OAuth2 client-credentials grant and request
//! composition; [`Deliveries`] exposes the typed delivery operations.
//!
//! ```no_run
//! # async fn run() -> rush_types::traits::Result<()> {
//! use rush_client::ApiClient;
//! use rush_config::ClientConfig;
//!
//! let client = ApiClient::new(ClientConfig::new("id", "secret").with_sandbox(true))?;
//! client.fetch_access_token().await?;
//! let delivery = client.deliveries().get("8b58bc58-7352-4278-87b1-4e7a4b8d3c6b").await?;
//! println!("{delivery}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod deliveries;
pub mod query;
pub mod resource;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{API_HOST, API_VERSION, ApiClient, SANDBOX_PREFIX, TOKEN_URL};
pub use deliveries::Deliveries;
pub use resource::{ResourceRequest, translate};
pub use transport::ReqwestTransport;
