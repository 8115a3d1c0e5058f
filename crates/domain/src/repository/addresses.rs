//! Address repository and its finders.

use sameday_core::{AddressId, UserId};

use super::{Entity, InMemoryRepository};
use crate::model::Address;

impl Entity for Address {
    type Id = AddressId;
    const KIND: &'static str = "address";

    fn id(&self) -> AddressId {
        self.id()
    }
}

/// In-memory store of addresses, keyed by identity; ownership is a field,
/// not a separate index.
pub type AddressRepository = InMemoryRepository<Address>;

impl AddressRepository {
    /// All addresses owned by `owner`, in insertion order.
    #[must_use]
    pub fn owned_by(&self, owner: UserId) -> Vec<Address> {
        self.iter().filter(|a| a.owner == owner).cloned().collect()
    }

    /// The owner's default address, if one is marked.
    #[must_use]
    pub fn default_for(&self, owner: UserId) -> Option<&Address> {
        self.iter().find(|a| a.owner == owner && a.is_default)
    }

    /// Clear the default flag on every address of `owner`.
    ///
    /// Used before marking a new default so the single-default invariant
    /// holds at every observable point.
    pub fn clear_defaults_for(&mut self, owner: UserId) {
        let ids: Vec<AddressId> = self
            .iter()
            .filter(|a| a.owner == owner && a.is_default)
            .map(Address::id)
            .collect();
        for id in ids {
            if let Some(address) = self.find_mut(id) {
                address.is_default = false;
            }
        }
    }

    /// Addresses in a given zone, in insertion order.
    #[must_use]
    pub fn in_zone(&self, zone: &str) -> Vec<Address> {
        self.iter().filter(|a| a.zone == zone).cloned().collect()
    }
}
