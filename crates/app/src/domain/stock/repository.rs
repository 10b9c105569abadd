//! Stock Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    companies::records::StoreId, products::records::ProductId, stock::records::StockRecord,
};

const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");
const GET_STOCK_SQL: &str = include_str!("sql/get_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStockRepository;

impl PgStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Subtract `quantity` in a single row update. Returns the number of rows
    /// touched; zero means there is no stock record for the pair.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        product: ProductId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(store.into_i64())
            .bind(product.into_i64())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        product: ProductId,
        quantity: i64,
    ) -> Result<StockRecord, sqlx::Error> {
        query_as::<Postgres, StockRecord>(SET_STOCK_SQL)
            .bind(store.into_i64())
            .bind(product.into_i64())
            .bind(quantity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: StoreId,
        product: ProductId,
    ) -> Result<StockRecord, sqlx::Error> {
        query_as::<Postgres, StockRecord>(GET_STOCK_SQL)
            .bind(store.into_i64())
            .bind(product.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StockRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            store_id: StoreId::from_i64(row.try_get("store_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: row.try_get("quantity")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
