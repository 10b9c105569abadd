//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use till_app::domain::{companies::records::StoreRecord, users::records::UserProfile};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Current User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub company_id: i64,
    pub company_name: String,

    /// Stores the user may sell from
    pub stores: Vec<StoreResponse>,
}

/// Store Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreResponse {
    pub id: i64,
    pub name: String,
}

impl From<StoreRecord> for StoreResponse {
    fn from(store: StoreRecord) -> Self {
        Self {
            id: store.id.into_i64(),
            name: store.name,
        }
    }
}

impl From<UserProfile> for MeResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id.into_i64(),
            full_name: profile.user.full_name,
            email: profile.user.email,
            company_id: profile.user.company_id.into_i64(),
            company_name: profile.company_name,
            stores: profile.stores.into_iter().map(Into::into).collect(),
        }
    }
}

/// Current User Handler
///
/// Returns the signed-in user with their company and assigned stores.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;

    let profile = state
        .app
        .users
        .get_profile(user.id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
