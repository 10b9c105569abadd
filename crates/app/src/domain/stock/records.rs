//! Stock Records

use jiff::Timestamp;

use crate::domain::{companies::records::StoreId, products::records::ProductId};

/// Stock Record
///
/// Available quantity of one product at one store. The quantity is signed: checkout
/// decrements without a floor, so oversold products go negative.
#[derive(Debug, Clone)]
pub struct StockRecord {
    pub store_id: StoreId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub updated_at: Timestamp,
}
