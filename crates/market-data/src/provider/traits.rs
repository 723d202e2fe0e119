//! Price provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Trait for spot price providers.
///
/// Implement this trait to add support for a new price source. The core
/// crate only talks to providers through this trait, which keeps the
/// domain layer independent of any specific HTTP API.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cryptotracker_market_data::{MarketDataError, PriceProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl PriceProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_price(&self, _coin_id: &str) -> Result<f64, MarketDataError> {
///         Ok(42.0)
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider (e.g. "COINGECKO").
    ///
    /// Used for logging and error reporting.
    fn id(&self) -> &'static str;

    /// Fetch the current price of one asset in the quote currency.
    ///
    /// # Arguments
    ///
    /// * `coin_id` - The provider's asset identifier, already lowercased by the caller
    ///
    /// # Returns
    ///
    /// The quoted price on success, or a `MarketDataError` describing why the
    /// price could not be obtained.
    async fn get_latest_price(&self, coin_id: &str) -> Result<f64, MarketDataError>;
}
