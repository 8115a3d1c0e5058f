//! Shared newtypes and enums for the shipment domain.

pub mod email;
pub mod grid;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use grid::GridPoint;
pub use id::{AddressId, DelivererId, IncidentId, ShipmentId, UserId};
pub use status::{
    DelivererStatus, IncidentKind, IncidentSeverity, ShipmentPriority, ShipmentStatus, UserRole,
};
