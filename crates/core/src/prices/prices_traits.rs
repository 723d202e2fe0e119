use crate::errors::Result;
use crate::prices::prices_model::{
    ChartPoint, CoinSummary, DeleteOutcome, NewPriceObservation, PriceObservation, PriceQuote,
};
use async_trait::async_trait;

/// Trait for price observation repository operations
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    /// Create the backing table if it does not exist. Safe to call repeatedly.
    fn ensure_schema(&self) -> Result<()>;
    async fn append(&self, new_observation: NewPriceObservation) -> Result<PriceObservation>;
    /// All rows, newest first (`timestamp DESC, id DESC`).
    fn list_all(&self) -> Result<Vec<PriceObservation>>;
    fn list_by_coin(&self, coin: &str) -> Result<Vec<PriceObservation>>;
    /// Distinct coins, ascending.
    fn list_coins(&self) -> Result<Vec<String>>;
    async fn delete_by_id(&self, observation_id: i64) -> Result<DeleteOutcome>;
}

/// Trait for price service operations
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    async fn fetch_price(&self, coin: &str) -> Result<PriceQuote>;
    async fn fetch_and_save(&self, coin: &str) -> Result<PriceObservation>;
    fn get_prices(&self, coin_filter: Option<&str>) -> Result<Vec<PriceObservation>>;
    fn get_coins(&self) -> Result<Vec<String>>;
    fn get_chart_points(&self) -> Result<Vec<ChartPoint>>;
    fn get_coin_summary(&self, coin: &str) -> Result<Option<CoinSummary>>;
    async fn delete_price(&self, observation_id: i64) -> Result<DeleteOutcome>;
}
