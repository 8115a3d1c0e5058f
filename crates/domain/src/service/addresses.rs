//! Address service: validation and direct address manipulation.
//!
//! Callers that go through the user service get the same invariants; this
//! service exists for the ones that manipulate addresses directly and must
//! not be able to break the single-default rule.

use std::sync::{Arc, Mutex};

use sameday_core::{AddressId, GridPoint, UserId};

use super::lock;
use crate::error::DomainError;
use crate::model::{Address, NewAddress};
use crate::repository::{AddressRepository, RepositoryError};

/// Validate the required fields and coordinate ranges of a new address.
///
/// # Errors
///
/// Returns [`DomainError::InvalidAddress`] naming the first offending field.
pub(crate) fn validate(new: &NewAddress) -> Result<(), DomainError> {
    for (field, value) in [
        ("alias", &new.alias),
        ("street", &new.street),
        ("city", &new.city),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidAddress {
                field,
                reason: "must not be empty".to_owned(),
            });
        }
    }
    if !new.position.in_bounds() {
        return Err(DomainError::InvalidAddress {
            field: "position",
            reason: format!(
                "{} outside the grid ({}..={} on both axes)",
                new.position,
                GridPoint::MIN,
                GridPoint::MAX
            ),
        });
    }
    Ok(())
}

/// Direct address management over the shared address store.
pub struct AddressService {
    addresses: Arc<Mutex<AddressRepository>>,
}

impl AddressService {
    /// Create the service over the shared address store.
    #[must_use]
    pub const fn new(addresses: Arc<Mutex<AddressRepository>>) -> Self {
        Self { addresses }
    }

    /// Create an address for `owner`, maintaining the single-default
    /// invariant when the new address is marked default.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAddress`] naming the offending field.
    pub fn create(&self, owner: UserId, new: NewAddress) -> Result<Address, DomainError> {
        validate(&new)?;
        let mut addresses = lock(&self.addresses);
        if new.is_default {
            addresses.clear_defaults_for(owner);
        }
        let address = Address::new(owner, new);
        addresses.save(address.clone())?;
        Ok(address)
    }

    /// Mark an address as its owner's default, clearing the flag on all
    /// siblings under the same lock.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the address is absent.
    pub fn set_default(&self, id: AddressId) -> Result<Address, DomainError> {
        let mut addresses = lock(&self.addresses);
        let owner = addresses.get(id)?.owner;
        addresses.clear_defaults_for(owner);
        let address = addresses.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "address",
            id: id.into(),
        })?;
        address.is_default = true;
        Ok(address.clone())
    }

    /// Remove an address (strict: a miss is an error).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the address is absent.
    pub fn remove(&self, id: AddressId) -> Result<(), DomainError> {
        lock(&self.addresses).remove_strict(id)?;
        Ok(())
    }

    /// Look up an address by identity.
    #[must_use]
    pub fn find(&self, id: AddressId) -> Option<Address> {
        lock(&self.addresses).find(id).cloned()
    }

    /// Insertion-ordered snapshot of all addresses.
    #[must_use]
    pub fn all(&self) -> Vec<Address> {
        lock(&self.addresses).all()
    }

    /// Addresses owned by `owner`, in insertion order.
    #[must_use]
    pub fn owned_by(&self, owner: UserId) -> Vec<Address> {
        lock(&self.addresses).owned_by(owner)
    }

    /// Addresses in a zone, in insertion order.
    #[must_use]
    pub fn in_zone(&self, zone: &str) -> Vec<Address> {
        lock(&self.addresses).in_zone(zone)
    }

    /// Straight-line grid distance between two stored addresses.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if either address is absent.
    pub fn distance_between(&self, a: AddressId, b: AddressId) -> Result<f64, DomainError> {
        let addresses = lock(&self.addresses);
        let from = addresses.get(a)?.position;
        let to = addresses.get(b)?.position;
        Ok(from.distance_to(to))
    }
}
