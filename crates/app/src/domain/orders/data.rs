//! Order Data

use jiff::civil::Date;

use crate::domain::{
    companies::records::StoreId,
    orders::records::OrderId,
    pricing::LinePrice,
    products::records::ProductId,
    users::records::UserId,
};

/// Checkout request as received from the till, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub user: UserId,
    pub store: StoreId,
    pub payment_cash: i64,
    pub payment_non_cash: i64,

    /// Business date of the sale, `YYYY-MM-DD`.
    pub date: String,
}

/// Order header row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrder {
    pub order_number: String,
    pub user: UserId,
    pub store: StoreId,
    pub date: Date,
    pub grand_total: i64,
    pub payment_cash: i64,
    pub payment_non_cash: i64,
    pub receivable: i64,
}

/// Order line row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrderLine {
    pub order: OrderId,
    pub product: ProductId,
    pub position: i32,
    pub quantity: u32,
    pub price: LinePrice,
    pub total_price: i64,
}
