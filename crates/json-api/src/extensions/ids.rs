//! Id validation for path and body parameters.

use salvo::{oapi::extract::PathParam, prelude::StatusError};

use till_app::ids::TypedId;

/// Storage never assigns zero or negative ids, so those are rejected with `400`.
pub(crate) fn typed_id_or_400<T>(raw: i64, name: &str) -> Result<TypedId<T>, StatusError> {
    let id = TypedId::from_i64(raw);

    if id.is_valid() {
        Ok(id)
    } else {
        Err(StatusError::bad_request().brief(format!("{name} must be a positive id")))
    }
}

pub(crate) trait IdParamExt {
    fn into_id<T>(self, name: &str) -> Result<TypedId<T>, StatusError>;
}

impl IdParamExt for PathParam<i64> {
    fn into_id<T>(self, name: &str) -> Result<TypedId<T>, StatusError> {
        typed_id_or_400(self.into_inner(), name)
    }
}
