//! CoinGecko price provider.
//!
//! Fetches spot prices from the public `simple/price` endpoint:
//!
//! ```text
//! GET {base}/simple/price?ids={coin_id}&vs_currencies=eur
//! -> { "bitcoin": { "eur": 50000.0 } }
//! ```
//!
//! No API key is required. Unknown identifiers are answered with an empty
//! object rather than an HTTP error.
//! API documentation: https://docs.coingecko.com/reference/simple-price

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::provider::PriceProvider;

/// Public CoinGecko API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Ceiling for a single price request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The fixed quote currency, as the `vs_currencies` key the API expects.
pub const QUOTE_CURRENCY: &str = "eur";

const PROVIDER_ID: &str = "COINGECKO";

/// CoinGecko price provider.
///
/// # Example
///
/// ```ignore
/// use cryptotracker_market_data::{CoinGeckoProvider, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
///
/// let provider = CoinGeckoProvider::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)?;
/// let price = provider.get_latest_price("bitcoin").await?;
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider against `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::Network {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn price_url(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }

    /// Issue the request and return the raw response body.
    async fn fetch(&self, coin_id: &str) -> Result<String, MarketDataError> {
        debug!("CoinGecko request: simple/price ids={}", coin_id);

        let response = self
            .client
            .get(self.price_url())
            .header("accept", "application/json")
            .query(&[("ids", coin_id), ("vs_currencies", QUOTE_CURRENCY)])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("CoinGecko returned HTTP {} for '{}'", status, coin_id);
            return Err(MarketDataError::Network {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response.text().await.map_err(map_request_error)
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_price(&self, coin_id: &str) -> Result<f64, MarketDataError> {
        if coin_id.is_empty() {
            return Err(MarketDataError::InvalidInput(
                "coin identifier must not be empty".to_string(),
            ));
        }

        let body = self.fetch(coin_id).await?;
        let json: Value = serde_json::from_str(&body).map_err(|e| MarketDataError::Unexpected {
            provider: PROVIDER_ID.to_string(),
            message: format!("Malformed JSON: {}", e),
        })?;

        let price = extract_price(&json, coin_id)?;
        debug!("CoinGecko price for {}: {} {}", coin_id, price, QUOTE_CURRENCY);
        Ok(price)
    }
}

fn map_request_error(e: reqwest::Error) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        }
    }
}

fn unexpected(message: String) -> MarketDataError {
    MarketDataError::Unexpected {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}

/// Pull `body[coin_id][QUOTE_CURRENCY]` out of a `simple/price` response.
///
/// A missing key is `NotFound`; a key holding the wrong JSON type is `Unexpected`.
fn extract_price(body: &Value, coin_id: &str) -> Result<f64, MarketDataError> {
    let prices = body
        .as_object()
        .ok_or_else(|| unexpected("Response is not a JSON object".to_string()))?;

    let Some(entry) = prices.get(coin_id) else {
        return Err(MarketDataError::NotFound(coin_id.to_string()));
    };

    let entry = entry
        .as_object()
        .ok_or_else(|| unexpected(format!("Entry for '{}' is not an object", coin_id)))?;

    let Some(price) = entry.get(QUOTE_CURRENCY) else {
        return Err(MarketDataError::NotFound(coin_id.to_string()));
    };

    price.as_f64().ok_or_else(|| {
        unexpected(format!(
            "Price for '{}' in {} is not a number",
            coin_id, QUOTE_CURRENCY
        ))
    })
}
