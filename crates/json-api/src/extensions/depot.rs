//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use till_app::auth::AuthenticatedUser;

/// Typed access to values stashed in the depot by middleware.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user(&mut self, user: AuthenticatedUser);

    /// The user resolved by the auth middleware.
    fn user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user(&mut self, user: AuthenticatedUser) {
        self.inject(user);
    }

    fn user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
