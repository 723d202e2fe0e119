//! Database models for price observations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use cryptotracker_core::prices::{NewPriceObservation, PriceObservation};

/// Database model for a stored price observation
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceDB {
    pub id: i64,
    pub coin: String,
    pub price: f64,
    pub timestamp: NaiveDateTime,
}

/// Database model for inserting a price observation
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::prices)]
pub struct NewPriceDB {
    pub coin: String,
    pub price: f64,
    pub timestamp: NaiveDateTime,
}

impl NewPriceDB {
    /// Stamp a domain input with the insertion time.
    pub fn stamped(domain: NewPriceObservation, timestamp: NaiveDateTime) -> Self {
        Self {
            coin: domain.coin,
            price: domain.price,
            timestamp,
        }
    }
}

// Conversion to domain models
impl From<PriceDB> for PriceObservation {
    fn from(db: PriceDB) -> Self {
        Self {
            id: db.id,
            coin: db.coin,
            price: db.price,
            timestamp: db.timestamp,
        }
    }
}
