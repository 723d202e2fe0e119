//! Tests for PriceService contracts and edge cases.
//!
//! 1. Fetch: identifiers are normalized before reaching the provider
//! 2. Save: only a successful fetch produces a stored observation
//! 3. Listing: filters normalize the coin and return newest first
//! 4. Delete: a missing row is an outcome, not an error

#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result, ValidationError};
    use crate::prices::{
        DeleteOutcome, NewPriceObservation, PriceObservation, PriceRepositoryTrait, PriceService,
        PriceServiceTrait,
    };
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use cryptotracker_market_data::{MarketDataError, PriceProvider};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock PriceProvider
    // =========================================================================

    #[derive(Default)]
    struct MockProvider {
        prices: HashMap<String, f64>,
        timeout: bool,
        requested: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn with_price(coin: &str, price: f64) -> Self {
            let mut prices = HashMap::new();
            prices.insert(coin.to_string(), price);
            Self {
                prices,
                ..Default::default()
            }
        }

        fn timing_out() -> Self {
            Self {
                timeout: true,
                ..Default::default()
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_latest_price(
            &self,
            coin_id: &str,
        ) -> std::result::Result<f64, MarketDataError> {
            self.requested.lock().unwrap().push(coin_id.to_string());
            if self.timeout {
                return Err(MarketDataError::Timeout {
                    provider: "MOCK".to_string(),
                });
            }
            self.prices
                .get(coin_id)
                .copied()
                .ok_or_else(|| MarketDataError::NotFound(coin_id.to_string()))
        }
    }

    // =========================================================================
    // Mock PriceRepository
    // =========================================================================

    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<Vec<PriceObservation>>,
        next_id: Mutex<i64>,
        fail_on_append: bool,
    }

    impl MockRepository {
        fn base_time() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        }

        fn failing() -> Self {
            Self {
                fail_on_append: true,
                ..Default::default()
            }
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn sorted(mut rows: Vec<PriceObservation>) -> Vec<PriceObservation> {
            rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            rows
        }
    }

    #[async_trait]
    impl PriceRepositoryTrait for MockRepository {
        fn ensure_schema(&self) -> Result<()> {
            Ok(())
        }

        async fn append(&self, new_observation: NewPriceObservation) -> Result<PriceObservation> {
            if self.fail_on_append {
                return Err(Error::Unexpected("Intentional append failure".into()));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let row = PriceObservation {
                id: *next_id,
                coin: new_observation.coin,
                price: new_observation.price,
                timestamp: Self::base_time() + Duration::seconds(*next_id),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        fn list_all(&self) -> Result<Vec<PriceObservation>> {
            Ok(Self::sorted(self.rows.lock().unwrap().clone()))
        }

        fn list_by_coin(&self, coin: &str) -> Result<Vec<PriceObservation>> {
            let rows = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.coin == coin)
                .cloned()
                .collect();
            Ok(Self::sorted(rows))
        }

        fn list_coins(&self) -> Result<Vec<String>> {
            let mut coins: Vec<String> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.coin.clone())
                .collect();
            coins.sort();
            coins.dedup();
            Ok(coins)
        }

        async fn delete_by_id(&self, observation_id: i64) -> Result<DeleteOutcome> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != observation_id);
            Ok(DeleteOutcome::from_affected_rows(before - rows.len()))
        }
    }

    fn service(provider: Arc<MockProvider>, repository: Arc<MockRepository>) -> PriceService {
        PriceService::new(provider, repository)
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_fetch_price_normalizes_identifier() {
        let provider = Arc::new(MockProvider::with_price("bitcoin", 50000.0));
        let repository = Arc::new(MockRepository::default());
        let svc = service(provider.clone(), repository.clone());

        let quote = svc.fetch_price("  BitCoin ").await.unwrap();

        assert_eq!(quote.coin, "bitcoin");
        assert_eq!(quote.price, 50000.0);
        assert_eq!(quote.currency, "EUR");
        assert_eq!(provider.requested(), vec!["bitcoin".to_string()]);
        assert_eq!(repository.len(), 0, "fetch_price must not store anything");
    }

    #[tokio::test]
    async fn test_fetch_and_save_stores_observation() {
        let provider = Arc::new(MockProvider::with_price("ethereum", 3000.0));
        let repository = Arc::new(MockRepository::default());
        let svc = service(provider, repository.clone());

        let saved = svc.fetch_and_save("Ethereum").await.unwrap();

        assert_eq!(saved.coin, "ethereum");
        assert_eq!(saved.price, 3000.0);
        assert_eq!(repository.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_and_save_skips_store_on_not_found() {
        let provider = Arc::new(MockProvider::default());
        let repository = Arc::new(MockRepository::default());
        let svc = service(provider, repository.clone());

        let result = svc.fetch_and_save("notacoin").await;

        assert!(matches!(
            result,
            Err(Error::MarketData(MarketDataError::NotFound(_)))
        ));
        assert_eq!(repository.len(), 0);
    }

    #[tokio::test]
    async fn test_fetch_and_save_skips_store_on_timeout() {
        let provider = Arc::new(MockProvider::timing_out());
        let repository = Arc::new(MockRepository::default());
        let svc = service(provider, repository.clone());

        let result = svc.fetch_and_save("bitcoin").await;

        assert!(matches!(
            result,
            Err(Error::MarketData(MarketDataError::Timeout { .. }))
        ));
        assert_eq!(repository.len(), 0);
    }

    #[tokio::test]
    async fn test_fetch_and_save_propagates_store_failure() {
        let provider = Arc::new(MockProvider::with_price("bitcoin", 50000.0));
        let repository = Arc::new(MockRepository::failing());
        let svc = service(provider, repository);

        let result = svc.fetch_and_save("bitcoin").await;
        assert!(matches!(result, Err(Error::Unexpected(_))));
    }

    #[tokio::test]
    async fn test_blank_identifier_is_rejected_before_fetch() {
        let provider = Arc::new(MockProvider::with_price("bitcoin", 50000.0));
        let repository = Arc::new(MockRepository::default());
        let svc = service(provider.clone(), repository);

        let result = svc.fetch_and_save("   ").await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(provider.requested().is_empty());
    }

    #[tokio::test]
    async fn test_get_prices_filter_and_summary() {
        let repository = Arc::new(MockRepository::default());
        repository
            .append(NewPriceObservation::new("bitcoin", 50000.0))
            .await
            .unwrap();
        repository
            .append(NewPriceObservation::new("ethereum", 3000.0))
            .await
            .unwrap();
        repository
            .append(NewPriceObservation::new("bitcoin", 51000.0))
            .await
            .unwrap();
        let svc = service(Arc::new(MockProvider::default()), repository);

        let all = svc.get_prices(None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].price, 51000.0);

        let bitcoin = svc.get_prices(Some("BITCOIN")).unwrap();
        assert_eq!(bitcoin.len(), 2);
        assert!(bitcoin.iter().all(|r| r.coin == "bitcoin"));

        assert!(svc.get_prices(Some("solana")).unwrap().is_empty());

        assert_eq!(
            svc.get_coins().unwrap(),
            vec!["bitcoin".to_string(), "ethereum".to_string()]
        );

        let summary = svc.get_coin_summary("bitcoin").unwrap().unwrap();
        assert_eq!(summary.latest_price, 51000.0);
        assert_eq!(summary.observations, 2);
        assert!(svc.get_coin_summary("solana").unwrap().is_none());

        let chart = svc.get_chart_points().unwrap();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[1].coin, "ethereum");
        assert_eq!(chart[1].price, 3000.0);
    }

    #[tokio::test]
    async fn test_delete_price_outcomes() {
        let repository = Arc::new(MockRepository::default());
        let row = repository
            .append(NewPriceObservation::new("bitcoin", 50000.0))
            .await
            .unwrap();
        let svc = service(Arc::new(MockProvider::default()), repository.clone());

        assert_eq!(svc.delete_price(row.id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(repository.len(), 0);
        assert_eq!(
            svc.delete_price(row.id).await.unwrap(),
            DeleteOutcome::NotFound
        );
    }
}
