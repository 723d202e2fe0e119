//! Crypto Tracker Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the price tracker.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod prices;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
