//! Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown store or product")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(ref source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}

/// Quantities arrive as signed JSON integers so a negative value is a `400` rather
/// than a body parse failure.
pub(crate) fn quantity_or_400(quantity: i64) -> Result<u32, StatusError> {
    if quantity < 0 {
        return Err(StatusError::bad_request().brief("quantity must not be negative"));
    }

    u32::try_from(quantity)
        .map_err(|_error| StatusError::bad_request().brief("quantity is too large"))
}
