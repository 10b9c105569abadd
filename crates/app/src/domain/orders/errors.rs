//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::products::records::ProductId;

/// Reasons a checkout request is refused before any storage access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutRejection {
    #[error("user is required")]
    MissingUser,

    #[error("store is required")]
    MissingStore,

    #[error("payments cannot be negative")]
    NegativePayment,

    #[error("a cash or non-cash payment is required")]
    MissingPayment,

    #[error("date is required")]
    MissingDate,

    #[error("invalid date \"{0}\"")]
    InvalidDate(String),
}

/// Reasons a checkout is abandoned once its transaction is open. Every write made by
/// the attempt is rolled back.
#[derive(Debug, Error)]
pub enum CheckoutAbort {
    #[error("no items in cart")]
    EmptyCart,

    #[error("stock update failed for product {0}")]
    MissingStock(ProductId),

    #[error("order total is out of range")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[source] Error),
}

impl From<Error> for CheckoutAbort {
    fn from(error: Error) -> Self {
        Self::Storage(error)
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Rejected(#[from] CheckoutRejection),

    #[error(transparent)]
    Aborted(#[from] CheckoutAbort),

    #[error("order not found")]
    NotFound,

    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
