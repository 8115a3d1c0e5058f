//! Shipment repository and its finders.

use sameday_core::{DelivererId, ShipmentId, ShipmentStatus, UserId};

use super::{Entity, InMemoryRepository};
use crate::model::Shipment;

impl Entity for Shipment {
    type Id = ShipmentId;
    const KIND: &'static str = "shipment";

    fn id(&self) -> ShipmentId {
        self.id()
    }
}

/// In-memory store of shipments.
pub type ShipmentRepository = InMemoryRepository<Shipment>;

impl ShipmentRepository {
    /// Shipments currently in `status`, in insertion order.
    #[must_use]
    pub fn with_status(&self, status: ShipmentStatus) -> Vec<Shipment> {
        self.iter()
            .filter(|s| s.status() == status)
            .cloned()
            .collect()
    }

    /// Shipments created by a client, in insertion order.
    #[must_use]
    pub fn for_client(&self, client: UserId) -> Vec<Shipment> {
        self.iter().filter(|s| s.client == client).cloned().collect()
    }

    /// Shipments assigned to a deliverer, in insertion order.
    #[must_use]
    pub fn for_deliverer(&self, deliverer: DelivererId) -> Vec<Shipment> {
        self.iter()
            .filter(|s| s.deliverer == Some(deliverer))
            .cloned()
            .collect()
    }
}
