//! Domain services.
//!
//! Services are constructed explicitly at process start (no hidden global
//! registry) and shared by reference or `Arc` with their callers. Each
//! service owns its repositories behind `std::sync::Mutex` and serializes
//! mutating operations per aggregate, so the whole bundle is `Send + Sync`.
//!
//! # Lock order
//!
//! Operations that must hold more than one repository lock always acquire
//! in this order, so cross-service calls cannot deadlock:
//!
//! `users -> shipments -> incidents -> deliverers -> addresses`

pub mod addresses;
pub mod deliverers;
pub mod shipments;
pub mod users;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use addresses::AddressService;
pub use deliverers::DelivererService;
pub use shipments::{IncidentResolution, ShipmentService};
pub use users::UserService;

use crate::repository::AddressRepository;

/// Lock a repository mutex, recovering the data from a poisoned lock.
///
/// Repository state is a plain map; a panic mid-operation in another thread
/// leaves it structurally intact, so continuing is safe.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The full service bundle, wired once at startup.
///
/// The address repository is shared between the user, address and shipment
/// services; the deliverer service is shared with the shipment service so
/// load adjustments stay atomic relative to assignment.
pub struct Services {
    pub users: UserService,
    pub addresses: AddressService,
    pub deliverers: Arc<DelivererService>,
    pub shipments: ShipmentService,
}

impl Services {
    /// Construct and wire every service over empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let addresses = Arc::new(Mutex::new(AddressRepository::new()));
        let deliverers = Arc::new(DelivererService::new());
        Self {
            users: UserService::new(Arc::clone(&addresses)),
            addresses: AddressService::new(Arc::clone(&addresses)),
            shipments: ShipmentService::new(Arc::clone(&deliverers), Arc::clone(&addresses)),
            deliverers,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}
