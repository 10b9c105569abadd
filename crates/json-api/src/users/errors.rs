//! User Errors

use salvo::http::StatusError;
use tracing::error;

use till_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::InvalidReference | UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(ref source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error().brief(error.to_string())
        }
    }
}
