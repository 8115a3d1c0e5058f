//! Entity aggregates of the shipment domain.
//!
//! All identities are random UUIDs generated at construction and immutable
//! thereafter; the `id()` accessors are the only way to read them.

pub mod address;
pub mod deliverer;
pub mod history;
pub mod incident;
pub mod shipment;
pub mod user;

pub use address::{Address, NewAddress};
pub use deliverer::{Deliverer, NewDeliverer};
pub use history::{Actor, StatusEvent};
pub use incident::{Incident, NewIncident};
pub use shipment::{NewShipment, Shipment};
pub use user::{NewUser, User};
