//! Crypto Tracker Market Data Crate
//!
//! This crate fetches the current quoted price of a single crypto asset
//! from an external provider.
//!
//! # Overview
//!
//! - [`PriceProvider`] - the provider seam used by the core crate
//! - [`CoinGeckoProvider`] - CoinGecko `simple/price` implementation
//! - [`MarketDataError`] - the fetch failure taxonomy
//!
//! Prices are always quoted in a single fixed currency ([`QUOTE_CURRENCY`]).
//! A fetch is one outbound request with a fixed timeout and no retry.

pub mod errors;
pub mod provider;

pub use errors::MarketDataError;
pub use provider::coingecko::{
    CoinGeckoProvider, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, QUOTE_CURRENCY,
};
pub use provider::PriceProvider;
