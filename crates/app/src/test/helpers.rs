//! Test Helpers

use crate::{
    domain::{
        carts::data::NewCartLine,
        pricing::Discount,
        products::{
            ProductsService, ProductsServiceError, data::NewProduct,
            records::{ProductId, ProductRecord},
        },
    },
    test::TestContext,
};

pub(crate) fn new_product(ctx: &TestContext, sku: &str, sale_price: i64) -> NewProduct {
    NewProduct {
        company: ctx.company,
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        purchase_price: 0,
        sale_price,
        unit_name: "pcs".to_string(),
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    sku: &str,
    sale_price: i64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(new_product(ctx, sku, sale_price))
        .await
}

/// Cart line for the context's user at the context's store.
pub(crate) fn new_line(
    ctx: &TestContext,
    product: ProductId,
    quantity: u32,
    base_price: i64,
    discount: Discount,
) -> NewCartLine {
    NewCartLine {
        user: ctx.user,
        store: ctx.store,
        product,
        quantity,
        base_price,
        discount,
    }
}
