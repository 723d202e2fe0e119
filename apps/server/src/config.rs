use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use cryptotracker_market_data::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub price_api_base_url: String,
    pub price_api_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: String,
}

impl Config {
    /// Read configuration from the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = var("CT_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CT_LISTEN_ADDR")?;
        let db_path = var("CT_DB_PATH").unwrap_or_else(|| "./db/crypto.db".into());
        let price_api_base_url =
            var("CT_PRICE_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let price_api_timeout = var("CT_PRICE_API_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);
        let cors_allow = var("CT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("CT_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let log_format = var("CT_LOG_FORMAT").unwrap_or_else(|| "text".to_string());
        Ok(Self {
            listen_addr,
            db_path,
            price_api_base_url,
            price_api_timeout,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}
