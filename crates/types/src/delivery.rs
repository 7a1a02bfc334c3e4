//! Delivery status values reported by the remote service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Webhook event type emitted when a delivery changes status.
pub const EVENT_DELIVERY_STATUS: &str = "deliveries.status_changed";

/// Lifecycle status of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Scheduled,
    Processing,
    NoCouriersAvailable,
    EnRouteToPickup,
    AtPickup,
    EnRouteToDropoff,
    AtDropoff,
    Completed,
    ClientCanceled,
    Returning,
    Returned,
    UnableToReturn,
    UnableToDeliver,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// Returns all known status variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Scheduled,
            Self::Processing,
            Self::NoCouriersAvailable,
            Self::EnRouteToPickup,
            Self::AtPickup,
            Self::EnRouteToDropoff,
            Self::AtDropoff,
            Self::Completed,
            Self::ClientCanceled,
            Self::Returning,
            Self::Returned,
            Self::UnableToReturn,
            Self::UnableToDeliver,
            Self::Unknown,
        ]
    }

    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Processing => "processing",
            Self::NoCouriersAvailable => "no_couriers_available",
            Self::EnRouteToPickup => "en_route_to_pickup",
            Self::AtPickup => "at_pickup",
            Self::EnRouteToDropoff => "en_route_to_dropoff",
            Self::AtDropoff => "at_dropoff",
            Self::Completed => "completed",
            Self::ClientCanceled => "client_canceled",
            Self::Returning => "returning",
            Self::Returned => "returned",
            Self::UnableToReturn => "unable_to_return",
            Self::UnableToDeliver => "unable_to_deliver",
            Self::Unknown => "unknown",
        }
    }

    /// Reads the `status` field of a decoded delivery.
    #[must_use]
    pub fn of(delivery: &serde_json::Value) -> Option<Self> {
        delivery
            .get("status")
            .and_then(serde_json::Value::as_str)
            .map(Self::from_wire)
    }

    /// Maps a wire string to a status; unrecognised values become `Unknown`.
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}
