//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Item Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemDeletedResponse {
    pub deleted: bool,
}

/// Delete Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart line deleted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    line: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartItemDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let line = line.into_id("line")?;

    let deleted = state
        .app
        .carts
        .delete_line(user.id, line)
        .await
        .map_err(into_status_error)?;

    if !deleted {
        return Err(StatusError::internal_server_error().brief("Failed to delete cart line"));
    }

    Ok(Json(CartItemDeletedResponse { deleted }))
}
