//! List Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, handlers::CartLineResponse},
    extensions::*,
    state::State,
};

/// List Cart Handler
///
/// Returns the signed-in user's cart lines at a store, with current stock.
#[endpoint(
    tags("carts"),
    summary = "List Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart lines"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    store: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Vec<CartLineResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let store = store.into_id("store")?;

    let lines = state
        .app
        .carts
        .list_lines(user.id, store)
        .await
        .map_err(into_status_error)?;

    Ok(Json(lines.into_iter().map(CartLineResponse::from).collect()))
}
