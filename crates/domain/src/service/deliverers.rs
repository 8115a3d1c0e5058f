//! Deliverer service: availability, capacity and ratings.

use std::sync::Mutex;

use tracing::info;

use sameday_core::{DelivererId, DelivererStatus, GridPoint};

use super::lock;
use crate::error::DomainError;
use crate::model::{Deliverer, NewDeliverer};
use crate::repository::{DelivererRepository, RepositoryError};

/// Tracks deliverer availability and shipment load.
///
/// `assign` and `release` are the only load mutations; the shipment service
/// calls them while holding its own shipment lock, so a deliverer's load
/// stays consistent with the shipments that reference them.
pub struct DelivererService {
    deliverers: Mutex<DelivererRepository>,
}

impl DelivererService {
    /// Create the service over an empty deliverer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deliverers: Mutex::new(DelivererRepository::new()),
        }
    }

    /// Register a new deliverer, ready for assignments.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateIdentity`] only on the
    /// astronomically unlikely UUID collision.
    pub fn register(&self, new: NewDeliverer) -> Result<Deliverer, DomainError> {
        let deliverer = Deliverer::new(new);
        lock(&self.deliverers).save(deliverer.clone())?;
        info!(deliverer = %deliverer.id(), name = %deliverer.name, zone = %deliverer.zone, "deliverer registered");
        Ok(deliverer)
    }

    /// Look up a deliverer by identity.
    #[must_use]
    pub fn find(&self, id: DelivererId) -> Option<Deliverer> {
        lock(&self.deliverers).find(id).cloned()
    }

    /// Insertion-ordered snapshot of all deliverers.
    #[must_use]
    pub fn all(&self) -> Vec<Deliverer> {
        lock(&self.deliverers).all()
    }

    /// Deliverers currently able to take one more shipment.
    #[must_use]
    pub fn available(&self) -> Vec<Deliverer> {
        lock(&self.deliverers).available()
    }

    /// Deliverers working a given zone, in insertion order.
    #[must_use]
    pub fn in_zone(&self, zone: &str) -> Vec<Deliverer> {
        lock(&self.deliverers).in_zone(zone)
    }

    /// The available deliverer closest to `point`.
    #[must_use]
    pub fn nearest_available(&self, point: GridPoint) -> Option<Deliverer> {
        lock(&self.deliverers).nearest_available(point).cloned()
    }

    /// Set a deliverer's shift status (break, off duty, back on shift).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the deliverer is absent.
    pub fn set_status(
        &self,
        id: DelivererId,
        status: DelivererStatus,
    ) -> Result<Deliverer, DomainError> {
        let mut deliverers = lock(&self.deliverers);
        let deliverer = deliverers.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "deliverer",
            id: id.into(),
        })?;
        deliverer.status = status;
        Ok(deliverer.clone())
    }

    /// Update a deliverer's position on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the deliverer is absent.
    pub fn update_position(
        &self,
        id: DelivererId,
        position: GridPoint,
    ) -> Result<Deliverer, DomainError> {
        let mut deliverers = lock(&self.deliverers);
        let deliverer = deliverers.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "deliverer",
            id: id.into(),
        })?;
        deliverer.position = position;
        Ok(deliverer.clone())
    }

    /// Charge one assignment against a deliverer's capacity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the deliverer is absent, or
    /// [`DomainError::DelivererUnavailable`] if they are at capacity or off
    /// shift.
    pub fn assign(&self, id: DelivererId) -> Result<Deliverer, DomainError> {
        let mut deliverers = lock(&self.deliverers);
        let deliverer = deliverers.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "deliverer",
            id: id.into(),
        })?;
        if !deliverer.take_assignment() {
            return Err(DomainError::DelivererUnavailable {
                deliverer: id,
                load: deliverer.load(),
                capacity: Deliverer::CAPACITY,
            });
        }
        Ok(deliverer.clone())
    }

    /// Release one assignment (delivery, cancellation or reassignment).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the deliverer is absent.
    pub fn release(&self, id: DelivererId) -> Result<Deliverer, DomainError> {
        let mut deliverers = lock(&self.deliverers);
        let deliverer = deliverers.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "deliverer",
            id: id.into(),
        })?;
        deliverer.release_assignment();
        Ok(deliverer.clone())
    }

    /// Record a completed delivery, optionally with a 1..=5 rating.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRating`] for an out-of-range score, or
    /// [`RepositoryError::NotFound`] if the deliverer is absent.
    pub fn record_delivery(
        &self,
        id: DelivererId,
        rating: Option<u8>,
    ) -> Result<Deliverer, DomainError> {
        if let Some(value) = rating {
            if !(1..=5).contains(&value) {
                return Err(DomainError::InvalidRating { value });
            }
        }
        let mut deliverers = lock(&self.deliverers);
        let deliverer = deliverers.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "deliverer",
            id: id.into(),
        })?;
        deliverer.record_delivery(rating);
        Ok(deliverer.clone())
    }
}

impl Default for DelivererService {
    fn default() -> Self {
        Self::new()
    }
}
