//! User repository and its finders.

use sameday_core::{Email, UserId};

use super::{Entity, InMemoryRepository};
use crate::model::User;

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id()
    }
}

/// In-memory store of users.
pub type UserRepository = InMemoryRepository<User>;

impl UserRepository {
    /// Find a user by email. Linear scan; emails are unique by service-level
    /// invariant.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&User> {
        self.iter().find(|u| u.email == *email)
    }

    /// Find a user by phone number.
    #[must_use]
    pub fn find_by_phone(&self, phone: &str) -> Option<&User> {
        self.iter().find(|u| u.phone == phone)
    }

    /// All active (not soft-deleted) users, in insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<User> {
        self.iter().filter(|u| u.active).cloned().collect()
    }
}
