//! Core error types for the crypto tracker.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

pub use cryptotracker_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open the database file or establish a connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A constraint was violated (NOT NULL, CHECK, etc.).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DatabaseError {
    /// Whether the storage could not be opened at all, as opposed to a
    /// statement failing on an open connection.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::PoolCreationFailed(_))
    }
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Database(DatabaseError::ConnectionFailed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_failures() {
        assert!(DatabaseError::ConnectionFailed("locked".into()).is_open_failure());
        assert!(DatabaseError::PoolCreationFailed("timeout".into()).is_open_failure());
        assert!(!DatabaseError::QueryFailed("no such table".into()).is_open_failure());
    }

    #[test]
    fn test_market_data_error_converts() {
        let err: Error = MarketDataError::NotFound("notacoin".into()).into();
        assert_eq!(
            err.to_string(),
            "Market data operation failed: No price data found for 'notacoin'"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err: Error = ValidationError::MissingField("coin".into()).into();
        assert_eq!(
            err.to_string(),
            "Input validation failed: Required field 'coin' is missing"
        );
    }
}
