//! Cart Data

use crate::domain::{
    companies::records::{CompanyId, StoreId},
    pricing::Discount,
    products::records::ProductId,
    users::records::UserId,
};

/// Cart line to insert, or to merge into the existing line for the same user, store
/// and product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub user: UserId,
    pub store: StoreId,
    pub product: ProductId,

    /// Added to the existing quantity when the line already exists.
    pub quantity: u32,

    /// Replaces the stored base price when the line already exists.
    pub base_price: i64,

    /// Replaces the stored discount when the line already exists.
    pub discount: Discount,
}

/// Product selection coming from the till. Priced from the catalog at the product's
/// current sale price with no discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartProduct {
    /// Company of the signed-in user; products of other companies are not found.
    pub company: CompanyId,

    pub user: UserId,
    pub store: StoreId,
    pub product: ProductId,
    pub quantity: u32,
}
