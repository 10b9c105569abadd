//! Products Data

use crate::domain::companies::records::{CompanyId, StoreId};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub company: CompanyId,
    pub sku: String,
    pub name: String,
    pub purchase_price: i64,

    /// Price a unit is sold at, used as the cart base price.
    pub sale_price: i64,

    pub unit_name: String,
}

/// Replacement catalog fields for an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub sku: String,
    pub name: String,
    pub purchase_price: i64,
    pub sale_price: i64,
    pub unit_name: String,
}

/// Catalog search filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    /// Case-insensitive substring of the product name. Blank matches everything.
    pub search: Option<String>,

    /// Include each product's stock at this store.
    pub store: Option<StoreId>,
}
