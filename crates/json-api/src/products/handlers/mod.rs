//! Product Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use till_app::domain::products::records::{ProductListing, ProductRecord};

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub purchase_price: i64,
    pub sale_price: i64,
    pub unit_name: String,

    /// Quantity at the requested store, omitted when no store was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.id.into_i64(),
            sku: product.sku,
            name: product.name,
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
            unit_name: product.unit_name,
            stock: None,
        }
    }
}

impl From<ProductListing> for ProductResponse {
    fn from(listing: ProductListing) -> Self {
        Self {
            stock: listing.stock,
            ..listing.product.into()
        }
    }
}
