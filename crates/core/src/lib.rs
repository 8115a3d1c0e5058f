//! SameDay Core - Shared types library.
//!
//! This crate provides common types used across all SameDay components:
//! - `domain` - Entity models, repositories and domain services
//! - `cli` - Command-line tools for seeding and demo runs
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage, no
//! service logic. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, grid coordinates
//!   and the status/role/priority enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
