//! CLI command implementations.

pub mod demo;
pub mod quote;
pub mod seed;
