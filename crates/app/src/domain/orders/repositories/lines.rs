//! Order Lines Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{try_get_line_price, try_get_quantity},
    domain::{
        orders::{
            data::NewOrderLine,
            records::{OrderId, OrderLineRecord},
        },
        products::records::ProductId,
    },
};

const INSERT_ORDER_LINE_SQL: &str = include_str!("../sql/insert_order_line.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("../sql/list_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: &NewOrderLine,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_LINE_SQL)
            .bind(line.order.into_i64())
            .bind(line.product.into_i64())
            .bind(line.position)
            .bind(i64::from(line.quantity))
            .bind(line.price.base_price)
            .bind(line.price.discount.kind.as_str())
            .bind(line.price.discount.value)
            .bind(line.price.discount_amount)
            .bind(line.price.sale_price)
            .bind(line.total_price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            position: row.try_get("position")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_line_price(row)?,
            total_price: row.try_get("total_price")?,
        })
    }
}
