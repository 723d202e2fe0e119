//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceProvider` trait that all providers implement
//! - The CoinGecko provider

mod traits;

pub mod coingecko;

pub use traits::PriceProvider;
