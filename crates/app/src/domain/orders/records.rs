//! Order Records

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        companies::records::StoreId, pricing::LinePrice, products::records::ProductId,
        users::records::UserId,
    },
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Sales order header with its lines. Immutable once written.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: OrderId,

    /// Human-facing number derived from the creation time.
    pub order_number: String,

    pub user_id: UserId,
    pub store_id: StoreId,
    pub date: Date,
    pub grand_total: i64,
    pub payment_cash: i64,
    pub payment_non_cash: i64,

    /// Unpaid balance, never below zero.
    pub receivable: i64,

    pub created_at: Timestamp,
    pub lines: Vec<OrderLineRecord>,
}

/// One product on a sales order, priced as it was in the cart.
#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub product_id: ProductId,
    pub position: i32,
    pub quantity: u32,
    pub price: LinePrice,
    pub total_price: i64,
}
