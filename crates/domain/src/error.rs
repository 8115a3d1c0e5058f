//! Unified error taxonomy for the domain services.

use thiserror::Error;

use sameday_core::{DelivererId, IncidentId, ShipmentStatus};

use crate::repository::RepositoryError;

/// Errors surfaced by the domain services.
///
/// All variants are locally recoverable; the caller decides whether to retry
/// or abort. Each one names the violated rule and the offending field or
/// value.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Storage-level failure (duplicate identity, missing entity).
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A user with this email is already registered.
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    /// An address field failed validation.
    #[error("invalid address: field `{field}` {reason}")]
    InvalidAddress {
        field: &'static str,
        reason: String,
    },

    /// Origin and destination do not form a deliverable route.
    #[error("invalid route: {reason}")]
    InvalidRoute { reason: String },

    /// The requested shipment status change is not in the transition table.
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        from: ShipmentStatus,
        to: ShipmentStatus,
    },

    /// The deliverer cannot take another shipment right now.
    #[error("deliverer {deliverer} unavailable (load {load} of {capacity})")]
    DelivererUnavailable {
        deliverer: DelivererId,
        load: u8,
        capacity: u8,
    },

    /// Automatic assignment found nobody able to take the shipment.
    #[error("no deliverer available for assignment")]
    NoDelivererAvailable,

    /// The incident was already closed.
    #[error("incident {incident} is already resolved")]
    IncidentClosed { incident: IncidentId },

    /// A delivery rating outside the accepted 1..=5 range.
    #[error("invalid rating: {value} (expected 1..=5)")]
    InvalidRating { value: u8 },
}
