//! Prices module - price observation models, services, and traits.
//!
//! ```text
//! PriceService → PriceProvider (market-data crate)
//!       ↓
//! PriceRepositoryTrait (storage-sqlite)
//! ```

mod prices_constants;
mod prices_model;
mod prices_service;
mod prices_traits;

#[cfg(test)]
mod prices_service_tests;

pub use prices_constants::*;
pub use prices_model::{
    ChartPoint, CoinSummary, DeleteOutcome, NewPriceObservation, PriceObservation, PriceQuote,
};
pub use prices_service::{normalize_coin_id, PriceService};
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
