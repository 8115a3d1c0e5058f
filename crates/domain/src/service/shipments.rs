//! Shipment service: the lifecycle state machine and deliverer assignment.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use sameday_core::{
    AddressId, DelivererId, GridPoint, IncidentId, ShipmentId, ShipmentPriority, ShipmentStatus,
    UserId,
};

use super::{DelivererService, lock};
use crate::error::DomainError;
use crate::model::{Actor, Incident, NewIncident, NewShipment, Shipment};
use crate::rates;
use crate::repository::{
    AddressRepository, IncidentRepository, RepositoryError, ShipmentRepository,
};

/// Outcome of handling a reported incident.
#[derive(Debug, Clone)]
pub enum IncidentResolution {
    /// The problem was dealt with; the delivery continues.
    Resolved { note: String },
    /// The delivery cannot continue; the shipment is cancelled.
    Unresolvable { note: String },
}

/// Orchestrates the shipment lifecycle.
///
/// Holds the shipment lock across every status change, so two racing calls
/// on the same shipment serialize and the loser sees the post-transition
/// state. Deliverer load changes go through [`DelivererService`] while that
/// lock is held, keeping capacity consistent with assignments.
pub struct ShipmentService {
    shipments: Mutex<ShipmentRepository>,
    incidents: Mutex<IncidentRepository>,
    deliverers: Arc<DelivererService>,
    addresses: Arc<Mutex<AddressRepository>>,
}

impl ShipmentService {
    /// Create the service over empty shipment/incident stores, sharing the
    /// deliverer service and address store.
    #[must_use]
    pub fn new(
        deliverers: Arc<DelivererService>,
        addresses: Arc<Mutex<AddressRepository>>,
    ) -> Self {
        Self {
            shipments: Mutex::new(ShipmentRepository::new()),
            incidents: Mutex::new(IncidentRepository::new()),
            deliverers,
            addresses,
        }
    }

    /// Resolve and validate a route, returning the origin position.
    fn route_origin(
        addresses: &AddressRepository,
        origin: AddressId,
        destination: AddressId,
    ) -> Result<GridPoint, DomainError> {
        if origin == destination {
            return Err(DomainError::InvalidRoute {
                reason: "origin and destination are the same address".to_owned(),
            });
        }
        let from = addresses
            .find(origin)
            .ok_or_else(|| DomainError::InvalidRoute {
                reason: format!("unknown origin address {origin}"),
            })?;
        addresses
            .find(destination)
            .ok_or_else(|| DomainError::InvalidRoute {
                reason: format!("unknown destination address {destination}"),
            })?;
        Ok(from.position)
    }

    /// Quote the cost of a shipment without creating it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRoute`] if the addresses are equal or
    /// either is unknown.
    pub fn quote(
        &self,
        origin: AddressId,
        destination: AddressId,
        weight: f64,
        priority: ShipmentPriority,
    ) -> Result<f64, DomainError> {
        let addresses = lock(&self.addresses);
        Self::route_origin(&addresses, origin, destination)?;
        let from = addresses.get(origin)?.position;
        let to = addresses.get(destination)?.position;
        Ok(rates::shipping_rate(from.distance_to(to), weight, priority))
    }

    /// Create a shipment in `Created`, quoting the cost at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRoute`] if the addresses are equal or
    /// either is unknown.
    pub fn create(&self, new: NewShipment) -> Result<Shipment, DomainError> {
        let cost = self.quote(new.origin, new.destination, new.weight, new.priority)?;
        let shipment = Shipment::new(new, cost);
        lock(&self.shipments).save(shipment.clone())?;
        info!(
            shipment = %shipment.id(),
            client = %shipment.client,
            cost,
            priority = ?shipment.priority,
            "shipment created"
        );
        Ok(shipment)
    }

    /// Assign a specific deliverer to a shipment. Legal only from `Created`.
    ///
    /// The shipment lock is held across the deliverer's capacity charge, so
    /// two racing assignments on the same shipment serialize: exactly one
    /// succeeds, the other observes `Assigned` and gets the transition error.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IllegalTransition`] if the shipment is not in
    /// `Created`, [`DomainError::DelivererUnavailable`] if the deliverer is
    /// at capacity or off shift, or [`RepositoryError::NotFound`] if either
    /// party is absent.
    pub fn assign_deliverer(
        &self,
        id: ShipmentId,
        deliverer: DelivererId,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        let mut shipments = lock(&self.shipments);
        let shipment = shipments.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "shipment",
            id: id.into(),
        })?;
        if shipment.status() != ShipmentStatus::Created {
            return Err(DomainError::IllegalTransition {
                from: shipment.status(),
                to: ShipmentStatus::Assigned,
            });
        }
        self.deliverers.assign(deliverer)?;
        shipment.deliverer = Some(deliverer);
        shipment.assigned_at = Some(chrono::Utc::now());
        shipment.record_transition(ShipmentStatus::Assigned, actor);
        info!(shipment = %id, deliverer = %deliverer, "deliverer assigned");
        Ok(shipment.clone())
    }

    /// Assign the available deliverer nearest to the shipment's origin.
    ///
    /// # Errors
    ///
    /// As [`Self::assign_deliverer`], plus
    /// [`DomainError::NoDelivererAvailable`] when nobody can take the
    /// shipment.
    pub fn assign_nearest(&self, id: ShipmentId, actor: Actor) -> Result<Shipment, DomainError> {
        let origin = {
            let shipments = lock(&self.shipments);
            let shipment = shipments.get(id)?;
            if shipment.status() != ShipmentStatus::Created {
                return Err(DomainError::IllegalTransition {
                    from: shipment.status(),
                    to: ShipmentStatus::Assigned,
                });
            }
            shipment.origin
        };
        let position = {
            let addresses = lock(&self.addresses);
            addresses.get(origin)?.position
        };
        let candidate = self
            .deliverers
            .nearest_available(position)
            .ok_or(DomainError::NoDelivererAvailable)?;
        // Capacity may have filled between the lookup and the charge; the
        // assignment call re-checks and the caller can retry.
        self.assign_deliverer(id, candidate.id(), actor)
    }

    /// Advance a shipment along the plain edges of the transition table:
    /// `Assigned -> InTransit`, `InTransit -> Delivered`, and cancellation
    /// from `Created` or `Assigned`.
    ///
    /// Edges that need a dedicated operation (assignment, incident report,
    /// incident resolution) are rejected here even though they are in the
    /// table; use the corresponding method instead.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IllegalTransition`] naming the current and
    /// requested states, or [`RepositoryError::NotFound`] if the shipment is
    /// absent.
    pub fn advance(
        &self,
        id: ShipmentId,
        target: ShipmentStatus,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        match target {
            ShipmentStatus::Delivered => self.deliver(id, None, actor),
            _ => self.advance_plain(id, target, actor),
        }
    }

    /// Complete a delivery with an optional 1..=5 service rating for the
    /// deliverer.
    ///
    /// # Errors
    ///
    /// As [`Self::advance`] to `Delivered`, plus
    /// [`DomainError::InvalidRating`] for an out-of-range score.
    pub fn complete(
        &self,
        id: ShipmentId,
        rating: Option<u8>,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        if let Some(value) = rating {
            if !(1..=5).contains(&value) {
                return Err(DomainError::InvalidRating { value });
            }
        }
        self.deliver(id, rating, actor)
    }

    fn advance_plain(
        &self,
        id: ShipmentId,
        target: ShipmentStatus,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        let mut shipments = lock(&self.shipments);
        let shipment = shipments.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "shipment",
            id: id.into(),
        })?;
        let from = shipment.status();
        let allowed = matches!(
            (from, target),
            (ShipmentStatus::Assigned, ShipmentStatus::InTransit)
                | (
                    ShipmentStatus::Created | ShipmentStatus::Assigned,
                    ShipmentStatus::Cancelled
                )
        );
        if !allowed {
            return Err(DomainError::IllegalTransition { from, to: target });
        }
        if target == ShipmentStatus::Cancelled {
            if let Some(deliverer) = shipment.deliverer {
                self.deliverers.release(deliverer)?;
            }
        }
        shipment.record_transition(target, actor);
        info!(shipment = %id, from = %from, to = %target, "shipment advanced");
        Ok(shipment.clone())
    }

    fn deliver(
        &self,
        id: ShipmentId,
        rating: Option<u8>,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        let mut shipments = lock(&self.shipments);
        let shipment = shipments.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "shipment",
            id: id.into(),
        })?;
        let from = shipment.status();
        if from != ShipmentStatus::InTransit {
            return Err(DomainError::IllegalTransition {
                from,
                to: ShipmentStatus::Delivered,
            });
        }
        if let Some(deliverer) = shipment.deliverer {
            self.deliverers.release(deliverer)?;
            self.deliverers.record_delivery(deliverer, rating)?;
        }
        shipment.delivered_at = Some(chrono::Utc::now());
        shipment.record_transition(ShipmentStatus::Delivered, actor);
        info!(shipment = %id, rating, "shipment delivered");
        Ok(shipment.clone())
    }

    /// Cancel a shipment. Shorthand for advancing to `Cancelled`.
    ///
    /// # Errors
    ///
    /// As [`Self::advance`] to `Cancelled`.
    pub fn cancel(&self, id: ShipmentId, actor: Actor) -> Result<Shipment, DomainError> {
        self.advance_plain(id, ShipmentStatus::Cancelled, actor)
    }

    /// Report an incident against an in-transit shipment, moving it to
    /// `IncidentReported` and attaching the incident.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IllegalTransition`] if the shipment is not in
    /// `InTransit`, or [`RepositoryError::NotFound`] if it is absent.
    pub fn report_incident(
        &self,
        id: ShipmentId,
        new: NewIncident,
        actor: Actor,
    ) -> Result<Incident, DomainError> {
        let mut shipments = lock(&self.shipments);
        let shipment = shipments.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "shipment",
            id: id.into(),
        })?;
        if shipment.status() != ShipmentStatus::InTransit {
            return Err(DomainError::IllegalTransition {
                from: shipment.status(),
                to: ShipmentStatus::IncidentReported,
            });
        }
        let incident = Incident::new(id, new);
        lock(&self.incidents).save(incident.clone())?;
        shipment.record_transition(ShipmentStatus::IncidentReported, actor);
        warn!(
            shipment = %id,
            incident = %incident.id(),
            kind = ?incident.kind,
            severity = ?incident.severity,
            "incident reported"
        );
        Ok(incident)
    }

    /// Close an incident and move its shipment on: back to `InTransit` when
    /// resolved, to `Cancelled` when unresolvable.
    ///
    /// For incident kinds that call for reassignment (inaccessible zone,
    /// deliverer unavailable), a resolved incident also hands the shipment
    /// to the nearest other available deliverer when one exists; otherwise
    /// the current deliverer keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncidentClosed`] if the incident was already
    /// resolved, [`DomainError::IllegalTransition`] if the owning shipment
    /// is not in `IncidentReported`, or [`RepositoryError::NotFound`] if
    /// either is absent.
    pub fn resolve_incident(
        &self,
        id: IncidentId,
        resolution: IncidentResolution,
        actor: Actor,
    ) -> Result<Shipment, DomainError> {
        let mut shipments = lock(&self.shipments);
        let mut incidents = lock(&self.incidents);
        let incident = incidents.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "incident",
            id: id.into(),
        })?;
        if incident.is_resolved() {
            return Err(DomainError::IncidentClosed { incident: id });
        }
        let shipment = shipments
            .find_mut(incident.shipment)
            .ok_or(RepositoryError::NotFound {
                entity: "shipment",
                id: incident.shipment.into(),
            })?;
        let from = shipment.status();
        if from != ShipmentStatus::IncidentReported {
            let to = match resolution {
                IncidentResolution::Resolved { .. } => ShipmentStatus::InTransit,
                IncidentResolution::Unresolvable { .. } => ShipmentStatus::Cancelled,
            };
            return Err(DomainError::IllegalTransition { from, to });
        }

        match resolution {
            IncidentResolution::Resolved { note } => {
                shipment.record_transition(ShipmentStatus::InTransit, actor);
                if incident.kind.requires_reassignment() {
                    self.reassign(shipment);
                }
                incident.close(note);
                info!(shipment = %shipment.id(), incident = %id, "incident resolved");
            }
            IncidentResolution::Unresolvable { note } => {
                if let Some(deliverer) = shipment.deliverer {
                    self.deliverers.release(deliverer)?;
                }
                shipment.record_transition(ShipmentStatus::Cancelled, actor);
                incident.close(note);
                warn!(
                    shipment = %shipment.id(),
                    incident = %id,
                    "incident unresolvable, shipment cancelled"
                );
            }
        }
        Ok(shipment.clone())
    }

    /// Hand the shipment to the nearest other available deliverer, keeping
    /// the current one when nobody else can take it.
    fn reassign(&self, shipment: &mut Shipment) {
        let position = {
            let addresses = lock(&self.addresses);
            match addresses.find(shipment.origin) {
                Some(address) => address.position,
                None => return,
            }
        };
        let replacement = self
            .deliverers
            .nearest_available(position)
            .filter(|candidate| Some(candidate.id()) != shipment.deliverer);
        let Some(replacement) = replacement else {
            warn!(shipment = %shipment.id(), "no replacement deliverer, keeping current");
            return;
        };
        if self.deliverers.assign(replacement.id()).is_err() {
            warn!(shipment = %shipment.id(), "replacement filled up, keeping current");
            return;
        }
        if let Some(previous) = shipment.deliverer.replace(replacement.id()) {
            if self.deliverers.release(previous).is_err() {
                warn!(shipment = %shipment.id(), deliverer = %previous, "stale deliverer reference on reassignment");
            }
        }
        shipment.assigned_at = Some(chrono::Utc::now());
        info!(shipment = %shipment.id(), deliverer = %replacement.id(), "shipment reassigned");
    }

    /// Delete a shipment and cascade-delete its incidents. Releases the
    /// deliverer when the shipment was still underway.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the shipment is absent.
    pub fn delete(&self, id: ShipmentId) -> Result<(), DomainError> {
        let mut shipments = lock(&self.shipments);
        let shipment = shipments.remove_strict(id)?;
        if !shipment.status().is_terminal() {
            if let Some(deliverer) = shipment.deliverer {
                self.deliverers.release(deliverer)?;
            }
        }
        let dropped = lock(&self.incidents).remove_for_shipment(id);
        info!(shipment = %id, incidents_dropped = dropped, "shipment deleted");
        Ok(())
    }

    /// Look up a shipment by identity.
    #[must_use]
    pub fn find(&self, id: ShipmentId) -> Option<Shipment> {
        lock(&self.shipments).find(id).cloned()
    }

    /// Insertion-ordered snapshot of all shipments.
    #[must_use]
    pub fn all(&self) -> Vec<Shipment> {
        lock(&self.shipments).all()
    }

    /// Shipments currently in `status`.
    #[must_use]
    pub fn with_status(&self, status: ShipmentStatus) -> Vec<Shipment> {
        lock(&self.shipments).with_status(status)
    }

    /// Shipments created by a client.
    #[must_use]
    pub fn for_client(&self, client: UserId) -> Vec<Shipment> {
        lock(&self.shipments).for_client(client)
    }

    /// Shipments assigned to a deliverer.
    #[must_use]
    pub fn for_deliverer(&self, deliverer: DelivererId) -> Vec<Shipment> {
        lock(&self.shipments).for_deliverer(deliverer)
    }

    /// Incidents attached to a shipment, oldest first.
    #[must_use]
    pub fn incidents_for(&self, shipment: ShipmentId) -> Vec<Incident> {
        lock(&self.incidents).for_shipment(shipment)
    }

    /// Every still-open incident.
    #[must_use]
    pub fn unresolved_incidents(&self) -> Vec<Incident> {
        lock(&self.incidents).unresolved()
    }

    /// Look up an incident by identity.
    #[must_use]
    pub fn find_incident(&self, id: IncidentId) -> Option<Incident> {
        lock(&self.incidents).find(id).cloned()
    }
}
