//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidReference => StatusError::bad_request().brief("Unknown store"),
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(ref source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
