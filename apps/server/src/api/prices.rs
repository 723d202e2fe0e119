use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use cryptotracker_core::prices::{
    ChartPoint, CoinSummary, DeleteOutcome, PriceObservation, PriceQuote,
};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
struct PriceFilter {
    coin: Option<String>,
}

#[derive(Deserialize)]
struct SavePriceRequest {
    coin: String,
}

async fn list_prices(
    State(state): State<Arc<AppState>>,
    filter: Result<Query<PriceFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<PriceObservation>>> {
    let Query(filter) = filter?;
    // An empty `?coin=` means "all coins".
    let coin = filter.coin.as_deref().filter(|c| !c.trim().is_empty());
    let rows = state.price_service.get_prices(coin)?;
    Ok(Json(rows))
}

async fn save_price(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SavePriceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PriceObservation>)> {
    let Json(body) = body?;
    let saved = state.price_service.fetch_and_save(&body.coin).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn get_quote(
    coin: Result<Path<String>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PriceQuote>> {
    let Path(coin) = coin?;
    let quote = state.price_service.fetch_price(&coin).await?;
    Ok(Json(quote))
}

async fn delete_price(
    id: Result<Path<i64>, PathRejection>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    match state.price_service.delete_price(id).await? {
        DeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        DeleteOutcome::NotFound => Err(ApiError::NotFound(format!("No entry with ID {}", id))),
    }
}

async fn list_coins(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let coins = state.price_service.get_coins()?;
    Ok(Json(coins))
}

async fn get_coin_summary(
    Path(coin): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CoinSummary>> {
    state
        .price_service
        .get_coin_summary(&coin)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No saved prices for '{}'", coin.trim())))
}

async fn get_chart(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ChartPoint>>> {
    let points = state.price_service.get_chart_points()?;
    Ok(Json(points))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", get(list_prices).post(save_price))
        .route("/prices/quote/{coin}", get(get_quote))
        .route("/prices/{id}", delete(delete_price))
        .route("/coins", get(list_coins))
        .route("/coins/{coin}/summary", get(get_coin_summary))
        .route("/chart", get(get_chart))
}
