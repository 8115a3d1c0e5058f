//! SameDay Domain - Shipment lifecycle and assignment domain model.
//!
//! This crate is the in-memory core of the shipment-management system:
//!
//! - [`model`] - Entity aggregates (User, Address, Deliverer, Shipment,
//!   Incident) and the append-only status history
//! - [`repository`] - Keyed in-memory storage with save/find/update/delete
//!   contracts enforcing identity uniqueness
//! - [`service`] - Domain services orchestrating the repositories and
//!   enforcing cross-entity rules (unique email, single default address,
//!   the shipment state machine, deliverer capacity)
//! - [`rates`] - Shipping rate calculation
//!
//! There is no I/O here. Presentation layers, persistence and seeding are
//! external callers of the service API; errors surface as the typed
//! [`DomainError`] taxonomy rather than leaking storage internals.
//!
//! # Concurrency
//!
//! Repositories are not thread-safe. Services own them behind mutexes and
//! serialize mutating operations per aggregate, so the service layer can be
//! shared across threads (`Services` is `Send + Sync`).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod model;
pub mod rates;
pub mod repository;
pub mod service;

pub use error::DomainError;
pub use repository::RepositoryError;
pub use service::Services;
