//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{
        companies::records::StoreId, pricing::LinePrice, products::records::ProductId,
        users::records::UserId,
    },
    ids::TypedId,
};

/// Cart Line ID
pub type CartLineId = TypedId<CartLineRecord>;

/// Cart Line Record
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub id: CartLineId,
    pub user_id: UserId,
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: LinePrice,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart line as listed to the cashier, with the product name and the store's
/// current stock for it.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: LinePrice,

    /// Zero when the store has no stock record for the product.
    pub stock_quantity: i64,
}
