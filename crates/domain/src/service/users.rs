//! User service: registration, authentication and address-list mutation.

use std::sync::{Arc, Mutex};

use tracing::info;

use sameday_core::{AddressId, Email, UserId};

use super::{addresses::validate, lock};
use crate::error::DomainError;
use crate::model::{Address, NewAddress, NewUser, User};
use crate::repository::{AddressRepository, RepositoryError, UserRepository};

/// Registration, authentication and per-user address management.
///
/// Enforces email uniqueness at registration time and the single-default
/// invariant over the user's addresses.
pub struct UserService {
    users: Mutex<UserRepository>,
    addresses: Arc<Mutex<AddressRepository>>,
}

impl UserService {
    /// Create the service over an empty user store, sharing the address
    /// store with the address and shipment services.
    #[must_use]
    pub fn new(addresses: Arc<Mutex<AddressRepository>>) -> Self {
        Self {
            users: Mutex::new(UserRepository::new()),
            addresses,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateEmail`] if a user with this email
    /// already exists.
    pub fn register(&self, new: NewUser) -> Result<User, DomainError> {
        let mut users = lock(&self.users);
        if users.find_by_email(&new.email).is_some() {
            return Err(DomainError::DuplicateEmail {
                email: new.email.to_string(),
            });
        }
        let user = User::new(new);
        users.save(user.clone())?;
        info!(user = %user.id(), email = %user.email, role = %user.role, "user registered");
        Ok(user)
    }

    /// Check a credential pair. Returns the user only when the email exists,
    /// the account is active and the opaque secret matches.
    #[must_use]
    pub fn authenticate(&self, email: &Email, password: &str) -> Option<User> {
        lock(&self.users)
            .find_by_email(email)
            .filter(|u| u.active && u.password == password)
            .cloned()
    }

    /// Look up a user by identity.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<User> {
        lock(&self.users).find(id).cloned()
    }

    /// Look up a user by email.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<User> {
        lock(&self.users).find_by_email(email).cloned()
    }

    /// Look up a user by phone number.
    #[must_use]
    pub fn find_by_phone(&self, phone: &str) -> Option<User> {
        lock(&self.users).find_by_phone(phone).cloned()
    }

    /// Insertion-ordered snapshot of all users.
    #[must_use]
    pub fn all(&self) -> Vec<User> {
        lock(&self.users).all()
    }

    /// Users that can still authenticate, in insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<User> {
        lock(&self.users).active()
    }

    /// Update a user's profile fields (name, phone, password).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent.
    pub fn update_profile(
        &self,
        id: UserId,
        name: String,
        phone: String,
        password: String,
    ) -> Result<User, DomainError> {
        let mut users = lock(&self.users);
        let user = users.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "user",
            id: id.into(),
        })?;
        user.name = name;
        user.phone = phone;
        user.password = password;
        Ok(user.clone())
    }

    /// Soft-delete a user. Shipment history keeps resolving; the account
    /// just stops authenticating.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent.
    pub fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        let mut users = lock(&self.users);
        let user = users.find_mut(id).ok_or(RepositoryError::NotFound {
            entity: "user",
            id: id.into(),
        })?;
        user.active = false;
        info!(user = %id, "user deactivated");
        Ok(user.clone())
    }

    /// Add an address to a user's collection.
    ///
    /// When the new address is marked default, the flag is cleared on all
    /// siblings under the same lock, so the single-default invariant holds
    /// at every observable point.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent, or
    /// [`DomainError::InvalidAddress`] if a required field fails validation.
    pub fn add_address(&self, user: UserId, new: NewAddress) -> Result<Address, DomainError> {
        validate(&new)?;
        let users = lock(&self.users);
        users.get(user)?;
        let mut addresses = lock(&self.addresses);
        if new.is_default {
            addresses.clear_defaults_for(user);
        }
        let address = Address::new(user, new);
        addresses.save(address.clone())?;
        info!(user = %user, address = %address.id(), alias = %address.alias, "address added");
        Ok(address)
    }

    /// Remove an address from a user's collection.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent or the
    /// address does not belong to them.
    pub fn remove_address(&self, user: UserId, address: AddressId) -> Result<(), DomainError> {
        let users = lock(&self.users);
        users.get(user)?;
        let mut addresses = lock(&self.addresses);
        match addresses.find(address) {
            Some(found) if found.owner == user => {
                addresses.remove(address);
                Ok(())
            }
            _ => Err(RepositoryError::NotFound {
                entity: "address",
                id: address.into(),
            }
            .into()),
        }
    }

    /// Mark one of the user's addresses as the default, clearing the flag
    /// on all siblings atomically from the caller's perspective.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent or the
    /// address does not belong to them.
    pub fn set_default_address(
        &self,
        user: UserId,
        address: AddressId,
    ) -> Result<Address, DomainError> {
        let users = lock(&self.users);
        users.get(user)?;
        let mut addresses = lock(&self.addresses);
        if !matches!(addresses.find(address), Some(found) if found.owner == user) {
            return Err(RepositoryError::NotFound {
                entity: "address",
                id: address.into(),
            }
            .into());
        }
        addresses.clear_defaults_for(user);
        let found = addresses.find_mut(address).ok_or(RepositoryError::NotFound {
            entity: "address",
            id: address.into(),
        })?;
        found.is_default = true;
        Ok(found.clone())
    }

    /// The user's default address, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent.
    pub fn default_address(&self, user: UserId) -> Result<Option<Address>, DomainError> {
        lock(&self.users).get(user)?;
        Ok(lock(&self.addresses).default_for(user).cloned())
    }

    /// The user's addresses, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the user is absent.
    pub fn addresses_of(&self, user: UserId) -> Result<Vec<Address>, DomainError> {
        lock(&self.users).get(user)?;
        Ok(lock(&self.addresses).owned_by(user))
    }
}
