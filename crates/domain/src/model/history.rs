//! Append-only status history for audit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sameday_core::{DelivererId, ShipmentStatus, UserId};

/// Who caused a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Actor {
    /// The system itself (automatic assignment, seeding).
    System,
    /// A client or admin acting through the API.
    User(UserId),
    /// The deliverer carrying the shipment.
    Deliverer(DelivererId),
}

/// One immutable entry in a shipment's status history.
///
/// Events are only ever appended; nothing in the domain mutates or removes
/// them once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusEvent {
    pub at: DateTime<Utc>,
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
    pub actor: Actor,
}

impl StatusEvent {
    /// Record a transition happening now.
    #[must_use]
    pub fn now(from: ShipmentStatus, to: ShipmentStatus, actor: Actor) -> Self {
        Self {
            at: Utc::now(),
            from,
            to,
            actor,
        }
    }
}
