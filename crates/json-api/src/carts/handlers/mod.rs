//! Cart Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use till_app::domain::carts::records::CartLineView;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Cart line id
    pub id: i64,

    pub product_id: i64,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price before discount
    pub base_price: i64,

    /// `FIXED` or `PERCENTAGE`
    pub discount_type: String,

    pub discount_value: i64,
    pub discount_amount: i64,

    /// Unit price after discount
    pub sale_price: i64,

    /// Current stock at the store, zero when the store has no stock record
    pub stock_quantity: i64,
}

impl From<CartLineView> for CartLineResponse {
    fn from(line: CartLineView) -> Self {
        Self {
            id: line.id.into_i64(),
            product_id: line.product_id.into_i64(),
            product_name: line.product_name,
            quantity: line.quantity,
            base_price: line.price.base_price,
            discount_type: line.price.discount.kind.to_string(),
            discount_value: line.price.discount.value,
            discount_amount: line.price.discount_amount,
            sale_price: line.price.sale_price,
            stock_quantity: line.stock_quantity,
        }
    }
}
