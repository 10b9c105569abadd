//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use till_app::domain::carts::data::CartProduct;

use crate::{
    carts::errors::{into_status_error, quantity_or_400},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Product id
    pub product: i64,

    /// Added to the existing quantity when the product is already in the cart
    pub quantity: i64,
}

/// Cart Item Added Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemAddedResponse {
    /// Id of the created or merged cart line
    pub id: i64,
}

/// Add Cart Item Handler
///
/// Adds a product at its current sale price. Adding a product that is already in
/// the cart merges into the existing line.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart line created or merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<i64>,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemAddedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let store = store.into_id("store")?;
    let request = json.into_inner();

    let selection = CartProduct {
        company: user.company_id,
        user: user.id,
        store,
        product: typed_id_or_400(request.product, "product")?,
        quantity: quantity_or_400(request.quantity)?,
    };

    let id = state
        .app
        .carts
        .add_product(selection)
        .await
        .map_err(into_status_error)?;

    debug!(line = %id, store = %store, "cart item added");

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartItemAddedResponse { id: id.into_i64() }))
}
