//! Product Records

use jiff::Timestamp;

use crate::{domain::companies::records::CompanyId, ids::TypedId};

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: ProductId,
    pub company_id: CompanyId,
    pub sku: String,
    pub name: String,
    pub purchase_price: i64,
    pub sale_price: i64,
    pub unit_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Product as returned by a catalog search.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub product: ProductRecord,

    /// Quantity at the searched store, zero without a stock record. `None` when no store
    /// was given.
    pub stock: Option<i64>,
}
