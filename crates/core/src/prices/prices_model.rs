//! Price domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted price record for a coin at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub id: i64,
    pub coin: String,
    pub price: f64,
    /// UTC insertion time, assigned by the store.
    pub timestamp: NaiveDateTime,
}

/// Input model for appending an observation.
///
/// The store assigns `id` and `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceObservation {
    pub coin: String,
    pub price: f64,
}

impl NewPriceObservation {
    pub fn new(coin: impl Into<String>, price: f64) -> Self {
        Self {
            coin: coin.into(),
            price,
        }
    }
}

/// A freshly fetched price that has not been stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub coin: String,
    pub price: f64,
    pub currency: String,
}

/// Result of a delete-by-id command.
///
/// A missing row is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub fn from_affected_rows(rows: usize) -> Self {
        if rows == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        }
    }
}

/// One bar of the coin-vs-price chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub coin: String,
    pub price: f64,
}

impl From<&PriceObservation> for ChartPoint {
    fn from(observation: &PriceObservation) -> Self {
        Self {
            coin: observation.coin.clone(),
            price: observation.price,
        }
    }
}

/// Latest stored price of one coin, plus how many observations exist for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoinSummary {
    pub coin: String,
    pub latest_price: f64,
    pub latest_timestamp: NaiveDateTime,
    pub observations: usize,
}

impl CoinSummary {
    /// Build a summary from observations of a single coin, ordered newest first.
    pub fn from_newest_first(observations: &[PriceObservation]) -> Option<Self> {
        let newest = observations.first()?;
        Some(Self {
            coin: newest.coin.clone(),
            latest_price: newest.price,
            latest_timestamp: newest.timestamp,
            observations: observations.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn observation(id: i64, coin: &str, price: f64, second: u32) -> PriceObservation {
        PriceObservation {
            id,
            coin: coin.to_string(),
            price,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, second)
                .unwrap(),
        }
    }

    #[test]
    fn test_delete_outcome_from_affected_rows() {
        assert_eq!(DeleteOutcome::from_affected_rows(0), DeleteOutcome::NotFound);
        assert_eq!(DeleteOutcome::from_affected_rows(1), DeleteOutcome::Deleted);
    }

    #[test]
    fn test_coin_summary_uses_first_row() {
        let rows = vec![
            observation(3, "bitcoin", 51000.0, 30),
            observation(1, "bitcoin", 50000.0, 10),
        ];
        let summary = CoinSummary::from_newest_first(&rows).unwrap();
        assert_eq!(summary.coin, "bitcoin");
        assert_eq!(summary.latest_price, 51000.0);
        assert_eq!(summary.latest_timestamp, rows[0].timestamp);
        assert_eq!(summary.observations, 2);
    }

    #[test]
    fn test_coin_summary_empty() {
        assert!(CoinSummary::from_newest_first(&[]).is_none());
    }

    #[test]
    fn test_observation_serializes_camel_case() {
        let json = serde_json::to_value(observation(7, "ethereum", 3000.0, 0)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["coin"], "ethereum");
        assert_eq!(json["price"], 3000.0);
        assert_eq!(json["timestamp"], "2025-03-01T12:00:00");
    }

    #[test]
    fn test_delete_outcome_serialization() {
        assert_eq!(
            serde_json::to_value(DeleteOutcome::NotFound).unwrap(),
            "NOT_FOUND"
        );
    }
}
