//! Edit Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::errors::{into_status_error, quantity_or_400},
    extensions::*,
    state::State,
};

/// Edit Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EditCartItemRequest {
    /// Replaces the line's quantity
    pub quantity: i64,
}

/// Cart Item Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemUpdatedResponse {
    pub updated: bool,
}

/// Edit Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Edit Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<i64>,
    json: JsonBody<EditCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let line = line.into_id("line")?;
    let quantity = quantity_or_400(json.into_inner().quantity)?;

    let updated = state
        .app
        .carts
        .edit_quantity(user.id, line, quantity)
        .await
        .map_err(into_status_error)?;

    if !updated {
        return Err(StatusError::internal_server_error().brief("Failed to update cart line"));
    }

    Ok(Json(CartItemUpdatedResponse { updated }))
}
