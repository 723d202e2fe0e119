use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use cryptotracker_core::prices::{
    DeleteOutcome, NewPriceObservation, PriceObservation, PriceRepositoryTrait,
};
use cryptotracker_core::Result;

use super::model::{NewPriceDB, PriceDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::prices;

/// Idempotent DDL for the `prices` table and its lookup index.
pub const CREATE_PRICES_SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS prices (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        coin TEXT NOT NULL,
        price DOUBLE NOT NULL,
        timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_prices_coin_timestamp ON prices (coin, timestamp);
";

pub struct PriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PriceRepository { pool, writer }
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceRepository {
    fn ensure_schema(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        conn.batch_execute(CREATE_PRICES_SCHEMA_SQL).into_core()?;
        debug!("prices schema ensured");
        Ok(())
    }

    async fn append(&self, new_observation: NewPriceObservation) -> Result<PriceObservation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PriceObservation> {
                // Never stamp earlier than the newest row, even if the clock steps back.
                let newest: Option<NaiveDateTime> = prices::table
                    .select(max(prices::timestamp))
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                let now = Utc::now().naive_utc();
                let stamp = newest.map_or(now, |newest| newest.max(now));
                let row = NewPriceDB::stamped(new_observation, stamp);
                let saved = diesel::insert_into(prices::table)
                    .values(&row)
                    .returning(PriceDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(PriceObservation::from(saved))
            })
            .await
    }

    fn list_all(&self) -> Result<Vec<PriceObservation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = prices::table
            .order((prices::timestamp.desc(), prices::id.desc()))
            .select(PriceDB::as_select())
            .load::<PriceDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PriceObservation::from).collect())
    }

    fn list_by_coin(&self, coin: &str) -> Result<Vec<PriceObservation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = prices::table
            .filter(prices::coin.eq(coin))
            .order((prices::timestamp.desc(), prices::id.desc()))
            .select(PriceDB::as_select())
            .load::<PriceDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PriceObservation::from).collect())
    }

    fn list_coins(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        prices::table
            .select(prices::coin)
            .distinct()
            .order(prices::coin.asc())
            .load::<String>(&mut conn)
            .into_core()
    }

    async fn delete_by_id(&self, observation_id: i64) -> Result<DeleteOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<DeleteOutcome> {
                let affected = diesel::delete(prices::table.find(observation_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(DeleteOutcome::from_affected_rows(affected))
            })
            .await
    }
}
