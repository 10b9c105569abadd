//! Orders Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    companies::records::StoreId,
    orders::{
        data::NewOrder,
        records::{OrderId, OrderRecord},
    },
    users::records::UserId,
};

const INSERT_ORDER_SQL: &str = include_str!("../sql/insert_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<OrderId, sqlx::Error> {
        let id: i64 = query_scalar(INSERT_ORDER_SQL)
            .bind(&order.order_number)
            .bind(order.user.into_i64())
            .bind(order.store.into_i64())
            .bind(SqlxDate::from(order.date))
            .bind(order.grand_total)
            .bind(order.payment_cash)
            .bind(order.payment_non_cash)
            .bind(order.receivable)
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::from_i64(id))
    }

    /// Fetch an order header placed by `user`. Lines are left empty.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        order: OrderId,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_i64())
            .bind(user.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            order_number: row.try_get("order_number")?,
            user_id: UserId::from_i64(row.try_get("user_id")?),
            store_id: StoreId::from_i64(row.try_get("store_id")?),
            date: row.try_get::<SqlxDate, _>("date")?.to_jiff(),
            grand_total: row.try_get("grand_total")?,
            payment_cash: row.try_get("payment_cash")?,
            payment_non_cash: row.try_get("payment_non_cash")?,
            receivable: row.try_get("receivable")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            lines: Vec::new(),
        })
    }
}
