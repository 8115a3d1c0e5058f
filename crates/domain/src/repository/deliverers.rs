//! Deliverer repository and its finders.

use sameday_core::{DelivererId, GridPoint};

use super::{Entity, InMemoryRepository};
use crate::model::Deliverer;

impl Entity for Deliverer {
    type Id = DelivererId;
    const KIND: &'static str = "deliverer";

    fn id(&self) -> DelivererId {
        self.id()
    }
}

/// In-memory store of deliverers.
pub type DelivererRepository = InMemoryRepository<Deliverer>;

impl DelivererRepository {
    /// Deliverers currently able to take one more shipment.
    #[must_use]
    pub fn available(&self) -> Vec<Deliverer> {
        self.iter().filter(|d| d.can_accept()).cloned().collect()
    }

    /// Deliverers working a given zone.
    #[must_use]
    pub fn in_zone(&self, zone: &str) -> Vec<Deliverer> {
        self.iter().filter(|d| d.zone == zone).cloned().collect()
    }

    /// The available deliverer closest to `point` by straight-line grid
    /// distance. Ties break toward the earlier-registered deliverer.
    #[must_use]
    pub fn nearest_available(&self, point: GridPoint) -> Option<&Deliverer> {
        self.iter()
            .filter(|d| d.can_accept())
            .min_by(|a, b| {
                a.position
                    .distance_to(point)
                    .total_cmp(&b.position.distance_to(point))
            })
    }
}
