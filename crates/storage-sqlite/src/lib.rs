//! SQLite storage implementation for the crypto tracker.
//!
//! This crate provides all database-related functionality using Diesel with SQLite.
//! It implements the repository traits defined in `cryptotracker-core` and contains:
//! - Database initialization and connection pooling
//! - The single writer actor that serializes all writes
//! - The `prices` table schema and its repository
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//! core (domain, traits)
//!          │
//!          ▼
//!  storage-sqlite (this crate)
//!          │
//!          ▼
//!      SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod prices;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from cryptotracker-core for convenience
pub use cryptotracker_core::errors::{DatabaseError, Error, Result};
