//! Address aggregate.

use serde::{Deserialize, Serialize};

use sameday_core::{AddressId, GridPoint, UserId};

/// Parameters for creating a new address. The owner is passed separately by
/// the service that performs the ownership check.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub alias: String,
    pub street: String,
    pub city: String,
    pub zone: String,
    pub zip_code: String,
    pub position: GridPoint,
    pub is_default: bool,
}

/// A delivery address owned by exactly one user.
///
/// At most one address per owner carries `is_default = true`; the user and
/// address services both maintain that invariant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    id: AddressId,
    pub owner: UserId,
    pub alias: String,
    pub street: String,
    pub city: String,
    pub zone: String,
    pub zip_code: String,
    pub position: GridPoint,
    pub is_default: bool,
}

impl Address {
    /// Construct an address with a fresh identity.
    ///
    /// Field validation is the address service's job; see
    /// `service::addresses::validate`.
    #[must_use]
    pub fn new(owner: UserId, new: NewAddress) -> Self {
        Self {
            id: AddressId::generate(),
            owner,
            alias: new.alias,
            street: new.street,
            city: new.city,
            zone: new.zone,
            zip_code: new.zip_code,
            position: new.position,
            is_default: new.is_default,
        }
    }

    /// The immutable identity of this address.
    #[must_use]
    pub const fn id(&self) -> AddressId {
        self.id
    }

    /// Single-line rendering for logs and receipts.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.street, self.zone, self.city, self.zip_code
        )
    }
}
