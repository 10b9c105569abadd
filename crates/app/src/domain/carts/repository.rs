//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{try_get_line_price, try_get_quantity},
    domain::{
        carts::{
            data::NewCartLine,
            records::{CartLineId, CartLineRecord, CartLineView},
        },
        companies::records::StoreId,
        pricing::LinePrice,
        products::records::ProductId,
        users::records::UserId,
    },
};

const UPSERT_CART_LINE_SQL: &str = include_str!("sql/upsert_cart_line.sql");
const UPDATE_CART_LINE_QUANTITY_SQL: &str = include_str!("sql/update_cart_line_quantity.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("sql/delete_cart_line.sql");
const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const LOCK_CART_LINES_SQL: &str = include_str!("sql/lock_cart_lines.sql");
const CLEAR_CART_LINES_SQL: &str = include_str!("sql/clear_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the line, or merge into the existing line for the same user, store and
    /// product: quantities add up and pricing is replaced. Returns the line id either way.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: &NewCartLine,
        price: &LinePrice,
    ) -> Result<CartLineId, sqlx::Error> {
        let id: i64 = query_scalar(UPSERT_CART_LINE_SQL)
            .bind(line.user.into_i64())
            .bind(line.store.into_i64())
            .bind(line.product.into_i64())
            .bind(i64::from(line.quantity))
            .bind(price.base_price)
            .bind(price.discount.kind.as_str())
            .bind(price.discount.value)
            .bind(price.discount_amount)
            .bind(price.sale_price)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartLineId::from_i64(id))
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        line: CartLineId,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_LINE_QUANTITY_SQL)
            .bind(line.into_i64())
            .bind(user.into_i64())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(line.into_i64())
            .bind(user.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        store: StoreId,
    ) -> Result<Vec<CartLineView>, sqlx::Error> {
        query_as::<Postgres, CartLineView>(LIST_CART_LINES_SQL)
            .bind(user.into_i64())
            .bind(store.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    /// Load every line for the user at the store in id order, locking the rows until
    /// the transaction ends.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        store: StoreId,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LOCK_CART_LINES_SQL)
            .bind(user.into_i64())
            .bind(store.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn clear_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        store: StoreId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_LINES_SQL)
            .bind(user.into_i64())
            .bind(store.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartLineId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            store_id: StoreId::from_i64(row.try_get("store_id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_line_price(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineView {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartLineId::from_i64(row.try_get("id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_line_price(row)?,
            stock_quantity: row.try_get("stock_quantity")?,
        })
    }
}
