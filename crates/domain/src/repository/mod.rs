//! In-memory keyed storage for the domain entities.
//!
//! One [`InMemoryRepository`] per entity type, with the save/find/update/
//! delete contract from the domain design:
//!
//! - `save` rejects an identity that is already present
//! - `find` returns an `Option`, never an error, on a miss
//! - `all` returns an insertion-ordered snapshot decoupled from the store
//! - `update` rejects an absent identity
//! - `remove` is idempotent; `remove_strict` errors on a miss
//!
//! Repositories are NOT thread-safe; concurrent callers serialize through
//! the service layer, which owns each repository behind a mutex.
//!
//! Entity-specific finders (`find_by_email`, `owned_by`, ...) live in the
//! sibling modules as inherent impls on the typed aliases.

pub mod addresses;
pub mod deliverers;
pub mod incidents;
pub mod shipments;
pub mod users;

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use uuid::Uuid;

pub use addresses::AddressRepository;
pub use deliverers::DelivererRepository;
pub use incidents::IncidentRepository;
pub use shipments::ShipmentRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// `save` was called with an identity that is already stored.
    #[error("duplicate identity: {entity} {id} already exists")]
    DuplicateIdentity { entity: &'static str, id: Uuid },

    /// The requested entity is not in the store.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
}

/// An aggregate that can live in an [`InMemoryRepository`].
pub trait Entity: Clone {
    /// The typed identity of this aggregate.
    type Id: Copy + Eq + Hash + Into<Uuid>;

    /// Entity name used in error messages ("user", "shipment", ...).
    const KIND: &'static str;

    /// The identity of this instance.
    fn id(&self) -> Self::Id;
}

/// Generic in-memory store: identity-to-entity map plus an insertion-order
/// index so `all()` snapshots are deterministic.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T: Entity> {
    entries: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Store a new entity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateIdentity`] if the identity is
    /// already present.
    pub fn save(&mut self, entity: T) -> Result<(), RepositoryError> {
        let id = entity.id();
        if self.entries.contains_key(&id) {
            return Err(RepositoryError::DuplicateIdentity {
                entity: T::KIND,
                id: id.into(),
            });
        }
        self.order.push(id);
        self.entries.insert(id, entity);
        Ok(())
    }

    /// Look up an entity by identity. A miss is not an error.
    #[must_use]
    pub fn find(&self, id: T::Id) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Mutable lookup, for in-place aggregate updates under the service
    /// layer's lock.
    pub fn find_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Look up an entity, treating a miss as [`RepositoryError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the identity is absent.
    pub fn get(&self, id: T::Id) -> Result<&T, RepositoryError> {
        self.entries.get(&id).ok_or(RepositoryError::NotFound {
            entity: T::KIND,
            id: id.into(),
        })
    }

    /// Insertion-ordered snapshot of every entity.
    ///
    /// The returned vector owns clones; mutating it cannot corrupt the
    /// store.
    #[must_use]
    pub fn all(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Iterate entities in insertion order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    /// Replace a stored entity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the identity is absent.
    pub fn update(&mut self, entity: T) -> Result<(), RepositoryError> {
        let id = entity.id();
        if !self.entries.contains_key(&id) {
            return Err(RepositoryError::NotFound {
                entity: T::KIND,
                id: id.into(),
            });
        }
        self.entries.insert(id, entity);
        Ok(())
    }

    /// Remove an entity; idempotent. Returns whether anything was removed.
    pub fn remove(&mut self, id: T::Id) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            self.order.retain(|stored| *stored != id);
        }
        removed
    }

    /// Remove an entity, treating a miss as an error (strict mode).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the identity is absent.
    pub fn remove_strict(&mut self, id: T::Id) -> Result<T, RepositoryError> {
        let removed = self.entries.remove(&id).ok_or(RepositoryError::NotFound {
            entity: T::KIND,
            id: id.into(),
        })?;
        self.order.retain(|stored| *stored != id);
        Ok(removed)
    }

    /// Whether an entity with this identity is stored.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sameday_core::{Email, UserRole};

    use super::*;
    use crate::model::{NewUser, User};

    fn user(email: &str) -> User {
        User::new(NewUser {
            name: "Test".into(),
            email: Email::parse(email).unwrap(),
            password: "secret".into(),
            phone: "3100000000".into(),
            role: UserRole::Client,
        })
    }

    #[test]
    fn test_save_then_find_roundtrips_all_fields() {
        let mut repo = UserRepository::new();
        let u = user("a@b.c");
        repo.save(u.clone()).unwrap();

        assert_eq!(repo.find(u.id()), Some(&u));
    }

    #[test]
    fn test_save_duplicate_identity_fails() {
        let mut repo = UserRepository::new();
        let u = user("a@b.c");
        repo.save(u.clone()).unwrap();

        let err = repo.save(u).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateIdentity { .. }));
    }

    #[test]
    fn test_find_miss_is_none_not_error() {
        let repo = UserRepository::new();
        assert!(repo.find(sameday_core::UserId::generate()).is_none());
    }

    #[test]
    fn test_update_missing_fails() {
        let mut repo = UserRepository::new();
        let err = repo.update(user("a@b.c")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_remove_is_idempotent_strict_is_not() {
        let mut repo = UserRepository::new();
        let u = user("a@b.c");
        let id = u.id();
        repo.save(u).unwrap();

        assert!(repo.remove(id));
        assert!(!repo.remove(id));
        assert!(matches!(
            repo.remove_strict(id),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_all_is_insertion_ordered_snapshot() {
        let mut repo = UserRepository::new();
        let first = user("first@x.y");
        let second = user("second@x.y");
        let third = user("third@x.y");
        for u in [&first, &second, &third] {
            repo.save(u.clone()).unwrap();
        }

        let mut snapshot = repo.all();
        assert_eq!(
            snapshot.iter().map(User::id).collect::<Vec<_>>(),
            vec![first.id(), second.id(), third.id()]
        );

        // Mutating the snapshot must not corrupt the store
        snapshot.clear();
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_removal_keeps_order_of_the_rest() {
        let mut repo = UserRepository::new();
        let a = user("a@x.y");
        let b = user("b@x.y");
        let c = user("c@x.y");
        for u in [&a, &b, &c] {
            repo.save(u.clone()).unwrap();
        }

        repo.remove(b.id());
        assert_eq!(
            repo.all().iter().map(User::id).collect::<Vec<_>>(),
            vec![a.id(), c.id()]
        );
    }
}
