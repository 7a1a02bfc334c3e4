//! Core types and traits for the uber-rush workspace.
//!
//! This crate defines the shared abstractions used by the configuration and
//! client layers: the error taxonomy, the OAuth access token, delivery status
//! values, and the transport trait the API client dispatches through.

pub mod delivery;
pub mod error;
pub mod token;
pub mod traits;

pub use delivery::{DeliveryStatus, EVENT_DELIVERY_STATUS};
pub use error::RushError;
pub use token::AccessToken;
pub use traits::{HttpTransport, RequestBody, TransportRequest, TransportResponse};
