use std::sync::Arc;

use cryptotracker_core::prices::{PriceRepositoryTrait, PriceService, PriceServiceTrait};
use cryptotracker_market_data::CoinGeckoProvider;
use cryptotracker_storage_sqlite::{db, prices::PriceRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub price_service: Arc<dyn PriceServiceTrait + Send + Sync>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Open the database, ensure the schema, and wire the price service.
///
/// Must be called from within a Tokio runtime: it spawns the writer actor.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    let writer = db::spawn_writer(&pool)?;
    let price_repository = Arc::new(PriceRepository::new(pool, writer));
    price_repository.ensure_schema()?;

    let provider = Arc::new(CoinGeckoProvider::new(
        config.price_api_base_url.clone(),
        config.price_api_timeout,
    )?);
    tracing::info!(
        "Price source: {} (timeout {:?})",
        provider.base_url(),
        config.price_api_timeout
    );

    let price_service = Arc::new(PriceService::new(provider, price_repository));

    Ok(Arc::new(AppState { price_service }))
}
