//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use till_app::domain::orders::OrdersServiceError;

/// Rejections are the caller's fault; aborts and storage failures are returned with
/// their message as the brief.
pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Rejected(rejection) => {
            StatusError::bad_request().brief(rejection.to_string())
        }
        OrdersServiceError::Aborted(abort) => {
            warn!(reason = %abort, "checkout aborted");

            StatusError::internal_server_error().brief(abort.to_string())
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(ref source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
