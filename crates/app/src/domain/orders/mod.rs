//! Orders
//!
//! Sales orders are created only by checking out a cart. See [`checkout`] for the
//! transaction that turns cart lines into an order.

pub mod checkout;
pub mod data;
pub mod errors;
pub mod number;
pub mod records;
mod repositories;
pub mod service;

pub use errors::{CheckoutAbort, CheckoutRejection, OrdersServiceError};
pub use service::*;
