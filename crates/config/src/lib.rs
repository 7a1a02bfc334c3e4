//! Configuration for the UberRUSH API client.
//!
//! Uses figment to merge caller-supplied values (programmatic, YAML, or
//! environment) over the documented defaults.

pub mod schema;

pub use schema::{ClientConfig, ENV_PREFIX};
