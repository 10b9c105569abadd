//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use till_app::domain::orders::{OrdersServiceError, data::CheckoutRequest};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    orders::errors::into_status_error,
    state::State,
};

/// Create Order Request
///
/// Missing fields default to zero or empty and are then rejected by validation, so
/// the caller learns which field was missing.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateOrderRequest {
    /// Amount paid in cash
    pub payment_cash: i64,

    /// Amount paid by card or transfer
    pub payment_non_cash: i64,

    /// Business date of the sale, `YYYY-MM-DD`
    pub date: String,
}

/// Order Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    pub order_id: i64,
}

/// Create Order Handler
///
/// Checks out the signed-in user's cart at the store. Either the order is written,
/// every product's stock is decremented and the cart is cleared, or nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Checkout aborted"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<i64>,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let store = store.into_id("store")?;
    let request = json.into_inner();

    let result = state
        .app
        .orders
        .create_order(CheckoutRequest {
            user: user.id,
            store,
            payment_cash: request.payment_cash,
            payment_non_cash: request.payment_non_cash,
            date: request.date,
        })
        .await;

    observe_checkout(match &result {
        Ok(_) => CheckoutOutcome::Committed,
        Err(OrdersServiceError::Rejected(_)) => CheckoutOutcome::Rejected,
        Err(_) => CheckoutOutcome::Aborted,
    });

    let order = result.map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{order}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderCreatedResponse {
        order_id: order.into_i64(),
    }))
}
