//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use till_app::domain::orders::records::{OrderLineRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub store_id: i64,

    /// Business date, `YYYY-MM-DD`
    pub date: String,

    pub grand_total: i64,
    pub payment_cash: i64,
    pub payment_non_cash: i64,
    pub receivable: i64,
    pub created_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.id.into_i64(),
            order_number: order.order_number,
            store_id: order.store_id.into_i64(),
            date: order.date.to_string(),
            grand_total: order.grand_total,
            payment_cash: order.payment_cash,
            payment_non_cash: order.payment_non_cash,
            receivable: order.receivable,
            created_at: order.created_at.to_string(),
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub product_id: i64,
    pub quantity: u32,
    pub base_price: i64,
    pub discount_type: String,
    pub discount_value: i64,
    pub discount_amount: i64,
    pub sale_price: i64,

    /// `sale_price * quantity`
    pub total_price: i64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            product_id: line.product_id.into_i64(),
            quantity: line.quantity,
            base_price: line.price.base_price,
            discount_type: line.price.discount.kind.to_string(),
            discount_value: line.price.discount.value,
            discount_amount: line.price.discount_amount,
            sale_price: line.price.sale_price,
            total_price: line.total_price,
        }
    }
}

/// Get Order Handler
///
/// Returns one of the signed-in user's orders with its lines.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let order = order.into_id("order")?;

    let order = state
        .app
        .orders
        .get_order(user.id, order)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
