//! Deliverer aggregate.

use serde::{Deserialize, Serialize};

use sameday_core::{DelivererId, DelivererStatus, GridPoint};

/// Parameters for registering a new deliverer.
#[derive(Debug, Clone)]
pub struct NewDeliverer {
    pub name: String,
    pub document: String,
    pub phone: String,
    pub zone: String,
    pub position: GridPoint,
}

/// A courier who carries out deliveries.
///
/// Referenced (not owned) by shipments. The `active_shipments` counter is
/// the authoritative capacity check; `status` is derived from it for the
/// Available/Active/Busy band and set explicitly for breaks and shift ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deliverer {
    id: DelivererId,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub zone: String,
    pub status: DelivererStatus,
    pub position: GridPoint,
    active_shipments: u8,
    completed_deliveries: u32,
    rated_deliveries: u32,
    average_rating: f64,
}

impl Deliverer {
    /// Maximum number of shipments a deliverer may carry at once.
    pub const CAPACITY: u8 = 3;

    /// Construct a deliverer with a fresh identity, ready for assignments.
    #[must_use]
    pub fn new(new: NewDeliverer) -> Self {
        Self {
            id: DelivererId::generate(),
            name: new.name,
            document: new.document,
            phone: new.phone,
            zone: new.zone,
            status: DelivererStatus::Available,
            position: new.position,
            active_shipments: 0,
            completed_deliveries: 0,
            rated_deliveries: 0,
            average_rating: 0.0,
        }
    }

    /// The immutable identity of this deliverer.
    #[must_use]
    pub const fn id(&self) -> DelivererId {
        self.id
    }

    /// Current number of shipments assigned to this deliverer.
    #[must_use]
    pub const fn load(&self) -> u8 {
        self.active_shipments
    }

    /// Deliveries completed over this deliverer's lifetime.
    #[must_use]
    pub const fn completed_deliveries(&self) -> u32 {
        self.completed_deliveries
    }

    /// Running average of delivery ratings, 0.0 when never rated.
    #[must_use]
    pub const fn average_rating(&self) -> f64 {
        self.average_rating
    }

    /// Whether this deliverer can take one more shipment right now.
    #[must_use]
    pub const fn can_accept(&self) -> bool {
        self.status.accepts_assignments() && self.active_shipments < Self::CAPACITY
    }

    /// Take one assignment, adjusting the load counter and the derived
    /// status band. Returns `false` (and changes nothing) when at capacity
    /// or off duty.
    pub fn take_assignment(&mut self) -> bool {
        if !self.can_accept() {
            return false;
        }
        self.active_shipments += 1;
        self.status = if self.active_shipments >= Self::CAPACITY {
            DelivererStatus::Busy
        } else {
            DelivererStatus::Active
        };
        true
    }

    /// Release one assignment (delivery, cancellation or reassignment).
    ///
    /// Break/off-duty statuses are preserved; only the Available/Active/Busy
    /// band is recomputed.
    pub fn release_assignment(&mut self) {
        self.active_shipments = self.active_shipments.saturating_sub(1);
        if matches!(
            self.status,
            DelivererStatus::Available | DelivererStatus::Active | DelivererStatus::Busy
        ) {
            self.status = if self.active_shipments == 0 {
                DelivererStatus::Available
            } else {
                DelivererStatus::Active
            };
        }
    }

    /// Record a completed delivery, optionally folding a 1..=5 rating into
    /// the running average. Range validation happens in the service.
    pub fn record_delivery(&mut self, rating: Option<u8>) {
        if let Some(score) = rating {
            let n = f64::from(self.rated_deliveries);
            self.average_rating = self.average_rating.mul_add(n, f64::from(score)) / (n + 1.0);
            self.rated_deliveries += 1;
        }
        self.completed_deliveries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deliverer() -> Deliverer {
        Deliverer::new(NewDeliverer {
            name: "Carlos Gomez".into(),
            document: "1094900001".into(),
            phone: "3100000001".into(),
            zone: "NORTE".into(),
            position: GridPoint::new(10.0, 20.0),
        })
    }

    #[test]
    fn test_capacity_band() {
        let mut d = deliverer();
        assert_eq!(d.status, DelivererStatus::Available);

        assert!(d.take_assignment());
        assert_eq!(d.status, DelivererStatus::Active);
        assert!(d.take_assignment());
        assert!(d.take_assignment());
        assert_eq!(d.status, DelivererStatus::Busy);
        assert_eq!(d.load(), 3);

        // Fourth assignment bounces
        assert!(!d.take_assignment());
        assert_eq!(d.load(), 3);

        d.release_assignment();
        assert_eq!(d.status, DelivererStatus::Active);
        d.release_assignment();
        d.release_assignment();
        assert_eq!(d.status, DelivererStatus::Available);
        assert_eq!(d.load(), 0);
    }

    #[test]
    fn test_off_duty_rejects_and_survives_release() {
        let mut d = deliverer();
        assert!(d.take_assignment());
        d.status = DelivererStatus::OffDuty;
        assert!(!d.take_assignment());

        d.release_assignment();
        // Shift state is not clobbered by load bookkeeping
        assert_eq!(d.status, DelivererStatus::OffDuty);
        assert_eq!(d.load(), 0);
    }

    #[test]
    fn test_rating_average() {
        let mut d = deliverer();
        d.record_delivery(Some(5));
        d.record_delivery(Some(3));
        assert!((d.average_rating() - 4.0).abs() < 1e-9);
        assert_eq!(d.completed_deliveries(), 2);

        // Unrated delivery counts for the total but not the average
        d.record_delivery(None);
        assert!((d.average_rating() - 4.0).abs() < 1e-9);
        assert_eq!(d.completed_deliveries(), 3);
    }
}
