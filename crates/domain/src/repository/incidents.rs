//! Incident repository and its finders.

use sameday_core::{IncidentId, ShipmentId};

use super::{Entity, InMemoryRepository};
use crate::model::Incident;

impl Entity for Incident {
    type Id = IncidentId;
    const KIND: &'static str = "incident";

    fn id(&self) -> IncidentId {
        self.id()
    }
}

/// In-memory store of incidents.
pub type IncidentRepository = InMemoryRepository<Incident>;

impl IncidentRepository {
    /// All incidents attached to a shipment, oldest first.
    #[must_use]
    pub fn for_shipment(&self, shipment: ShipmentId) -> Vec<Incident> {
        self.iter()
            .filter(|i| i.shipment == shipment)
            .cloned()
            .collect()
    }

    /// Every still-open incident, oldest first.
    #[must_use]
    pub fn unresolved(&self) -> Vec<Incident> {
        self.iter().filter(|i| !i.is_resolved()).cloned().collect()
    }

    /// Drop every incident attached to `shipment` (cascade delete).
    pub fn remove_for_shipment(&mut self, shipment: ShipmentId) -> usize {
        let ids: Vec<IncidentId> = self
            .iter()
            .filter(|i| i.shipment == shipment)
            .map(Incident::id)
            .collect();
        let count = ids.len();
        for id in ids {
            self.remove(id);
        }
        count
    }
}
