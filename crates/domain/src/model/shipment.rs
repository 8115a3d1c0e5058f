//! Shipment aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sameday_core::{AddressId, DelivererId, ShipmentId, ShipmentPriority, ShipmentStatus, UserId};

use super::history::{Actor, StatusEvent};

/// Parameters for creating a new shipment.
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub client: UserId,
    pub origin: AddressId,
    pub destination: AddressId,
    /// Package weight in kilograms.
    pub weight: f64,
    pub priority: ShipmentPriority,
}

/// A shipment moving through the delivery lifecycle.
///
/// Status changes go through [`Self::record_transition`], which appends to
/// the audit history; callers never set `status` directly. The legal
/// transitions live in [`ShipmentStatus::can_transition_to`] and are
/// enforced by the shipment service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    id: ShipmentId,
    pub client: UserId,
    pub origin: AddressId,
    pub destination: AddressId,
    pub deliverer: Option<DelivererId>,
    pub weight: f64,
    pub priority: ShipmentPriority,
    /// Cost quoted at creation time.
    pub cost: f64,
    status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    history: Vec<StatusEvent>,
}

impl Shipment {
    /// Construct a shipment in `Created` with a fresh identity.
    ///
    /// Route validation and cost quoting happen in the shipment service.
    #[must_use]
    pub fn new(new: NewShipment, cost: f64) -> Self {
        Self {
            id: ShipmentId::generate(),
            client: new.client,
            origin: new.origin,
            destination: new.destination,
            deliverer: None,
            weight: new.weight,
            priority: new.priority,
            cost,
            status: ShipmentStatus::Created,
            created_at: Utc::now(),
            assigned_at: None,
            delivered_at: None,
            history: Vec::new(),
        }
    }

    /// The immutable identity of this shipment.
    #[must_use]
    pub const fn id(&self) -> ShipmentId {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ShipmentStatus {
        self.status
    }

    /// The audit trail of every transition, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StatusEvent] {
        &self.history
    }

    /// Move to `target` and append the audit event.
    ///
    /// The caller (the shipment service) has already validated the
    /// transition; this only records it.
    pub fn record_transition(&mut self, target: ShipmentStatus, actor: Actor) {
        self.history.push(StatusEvent::now(self.status, target, actor));
        self.status = target;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shipment() -> Shipment {
        Shipment::new(
            NewShipment {
                client: UserId::generate(),
                origin: AddressId::generate(),
                destination: AddressId::generate(),
                weight: 2.0,
                priority: ShipmentPriority::Standard,
            },
            120.0,
        )
    }

    #[test]
    fn test_starts_created_with_empty_history() {
        let s = shipment();
        assert_eq!(s.status(), ShipmentStatus::Created);
        assert!(s.history().is_empty());
        assert!(s.deliverer.is_none());
    }

    #[test]
    fn test_serde_roundtrip_uses_wire_names() {
        let mut s = shipment();
        s.record_transition(ShipmentStatus::Assigned, Actor::System);
        s.record_transition(ShipmentStatus::InTransit, Actor::System);

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"IN_TRANSIT\""));
        assert!(json.contains("\"STANDARD\""));
        assert!(json.contains("\"SYSTEM\""));

        let back: Shipment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_transitions_append_to_history() {
        let mut s = shipment();
        s.record_transition(ShipmentStatus::Assigned, Actor::System);
        s.record_transition(ShipmentStatus::InTransit, Actor::System);

        let events = s.history();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].from, ShipmentStatus::Created);
        assert_eq!(events[0].to, ShipmentStatus::Assigned);
        assert_eq!(events[1].from, ShipmentStatus::Assigned);
        assert_eq!(events[1].to, ShipmentStatus::InTransit);
        assert_eq!(s.status(), ShipmentStatus::InTransit);
    }
}
