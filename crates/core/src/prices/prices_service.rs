use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use cryptotracker_market_data::PriceProvider;

use crate::errors::{Error, Result, ValidationError};
use crate::prices::prices_constants::{COIN_FIELD, QUOTE_CURRENCY_CODE};
use crate::prices::prices_model::{
    ChartPoint, CoinSummary, DeleteOutcome, NewPriceObservation, PriceObservation, PriceQuote,
};
use crate::prices::prices_traits::{PriceRepositoryTrait, PriceServiceTrait};

/// Trim and lowercase a user-supplied coin identifier.
///
/// The provider's identifier space is lowercase, so every entry point
/// normalizes before fetching, storing, or filtering.
pub fn normalize_coin_id(raw: &str) -> Result<String> {
    let coin = raw.trim().to_lowercase();
    if coin.is_empty() {
        return Err(ValidationError::MissingField(COIN_FIELD.to_string()).into());
    }
    Ok(coin)
}

pub struct PriceService {
    provider: Arc<dyn PriceProvider>,
    repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceService {
    pub fn new(
        provider: Arc<dyn PriceProvider>,
        repository: Arc<dyn PriceRepositoryTrait>,
    ) -> Self {
        PriceService {
            provider,
            repository,
        }
    }

    async fn fetch_normalized(&self, coin: &str) -> Result<f64> {
        match self.provider.get_latest_price(coin).await {
            Ok(price) => Ok(price),
            Err(e) => {
                if e.is_answer() {
                    info!("{} has no price for '{}'", self.provider.id(), coin);
                } else {
                    warn!("Price fetch for '{}' from {} failed: {}", coin, self.provider.id(), e);
                }
                Err(Error::MarketData(e))
            }
        }
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn fetch_price(&self, coin: &str) -> Result<PriceQuote> {
        let coin = normalize_coin_id(coin)?;
        let price = self.fetch_normalized(&coin).await?;
        Ok(PriceQuote {
            coin,
            price,
            currency: QUOTE_CURRENCY_CODE.to_string(),
        })
    }

    async fn fetch_and_save(&self, coin: &str) -> Result<PriceObservation> {
        let coin = normalize_coin_id(coin)?;
        let price = self.fetch_normalized(&coin).await?;
        let saved = self
            .repository
            .append(NewPriceObservation::new(coin, price))
            .await?;
        info!(
            "Saved price of {} ({} {}) as entry {}",
            saved.coin, saved.price, QUOTE_CURRENCY_CODE, saved.id
        );
        Ok(saved)
    }

    fn get_prices(&self, coin_filter: Option<&str>) -> Result<Vec<PriceObservation>> {
        match coin_filter {
            Some(coin) => {
                let coin = normalize_coin_id(coin)?;
                self.repository.list_by_coin(&coin)
            }
            None => self.repository.list_all(),
        }
    }

    fn get_coins(&self) -> Result<Vec<String>> {
        self.repository.list_coins()
    }

    fn get_chart_points(&self) -> Result<Vec<ChartPoint>> {
        let rows = self.repository.list_all()?;
        Ok(rows.iter().map(ChartPoint::from).collect())
    }

    fn get_coin_summary(&self, coin: &str) -> Result<Option<CoinSummary>> {
        let coin = normalize_coin_id(coin)?;
        let rows = self.repository.list_by_coin(&coin)?;
        Ok(CoinSummary::from_newest_first(&rows))
    }

    async fn delete_price(&self, observation_id: i64) -> Result<DeleteOutcome> {
        let outcome = self.repository.delete_by_id(observation_id).await?;
        match outcome {
            DeleteOutcome::Deleted => info!("Deleted price entry {}", observation_id),
            DeleteOutcome::NotFound => debug!("No price entry with id {}", observation_id),
        }
        Ok(outcome)
    }
}
