//! Error types for the market data crate.
//!
//! [`MarketDataError`] is the fetch failure taxonomy. Every variant is a
//! distinct condition that the presentation layer reports with its own message.

use thiserror::Error;

/// Errors that can occur while fetching a price.
///
/// No variant is retried automatically. A failed fetch is reported once and
/// the user may repeat the action.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request was rejected before reaching the provider.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered, but the response does not contain the requested
    /// identifier or its quote currency.
    #[error("No price data found for '{0}'")]
    NotFound(String),

    /// The provider did not answer within the timeout window.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// Transport-level failure (DNS, connection refused, TLS) or a non-success
    /// HTTP status.
    #[error("Network error: {provider} - {message}")]
    Network {
        /// The provider that could not be reached
        provider: String,
        /// The underlying transport error
        message: String,
    },

    /// Anything else, such as a malformed JSON body or an unexpected schema.
    #[error("Unexpected error: {provider} - {message}")]
    Unexpected {
        /// The provider that returned the response
        provider: String,
        /// Description of what was unexpected
        message: String,
    },
}

impl MarketDataError {
    /// Whether the provider was reached and answered with a well-formed response.
    ///
    /// Only `NotFound` qualifies: it is an answer, not a failure of the exchange.
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
