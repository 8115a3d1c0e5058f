//! User aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sameday_core::{Email, UserId, UserRole};

/// Parameters for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    /// Opaque secret; the domain never interprets it.
    pub password: String,
    pub phone: String,
    pub role: UserRole,
}

/// A registered user.
///
/// Users are never hard-deleted; deactivation flips the `active` flag so
/// shipment history keeps resolving. The owned address collection lives in
/// the address repository, keyed by owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    id: UserId,
    pub name: String,
    pub email: Email,
    pub password: String,
    pub phone: String,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Construct a user with a fresh identity.
    #[must_use]
    pub fn new(new: NewUser) -> Self {
        Self {
            id: UserId::generate(),
            name: new.name,
            email: new.email,
            password: new.password,
            phone: new.phone,
            role: new.role,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// The immutable identity of this user.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }
}
