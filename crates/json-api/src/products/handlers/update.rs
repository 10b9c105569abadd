//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use till_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub sku: String,
    pub name: String,
    pub purchase_price: i64,

    /// Price future cart lines start from
    pub sale_price: i64,

    pub unit_name: String,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            sku: request.sku,
            name: request.name,
            purchase_price: request.purchase_price,
            sale_price: request.sale_price,
            unit_name: request.unit_name,
        }
    }
}

/// Update Product Handler
///
/// Replaces every catalog field. Lines already in carts keep their price.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(company_id = tracing::field::Empty, product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<i64>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?;
    let product = product.into_id("product")?;

    let span = tracing::Span::current();

    span.record("company_id", tracing::field::display(user.company_id));
    span.record("product_id", tracing::field::display(product));

    let updated = state
        .app
        .products
        .update_product(user.company_id, product, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use till_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductId,
    };

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{TEST_USER, products_service},
    };

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{product}").put(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "sku": "RICE-5",
            "name": "Rice 5kg",
            "purchase_price": 5_000,
            "sale_price": 6_500,
            "unit_name": "bag",
        })
    }

    #[tokio::test]
    async fn test_update_product_returns_updated_fields() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .withf(|company, product, update| {
                *company == TEST_USER.company_id
                    && *product == ProductId::from_i64(12)
                    && update.sku == "RICE-5"
                    && update.sale_price == 6_500
                    && update.unit_name == "bag"
            })
            .return_once(|_, _, update| {
                let mut product = make_product(12, &update.name, update.sale_price);
                product.sku = update.sku;
                product.unit_name = update.unit_name;

                Ok(product)
            });

        let mut res = TestClient::put("http://example.com/products/12")
            .json(&body())
            .send(&make_service(repo))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 12);
        assert_eq!(body.sku, "RICE-5");
        assert_eq!(body.name, "Rice 5kg");
        assert_eq!(body.unit_name, "bag");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_field_is_rejected() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product().never();

        let res = TestClient::put("http://example.com/products/12")
            .json(&json!({ "sku": "RICE-5", "name": "Rice 5kg" }))
            .send(&make_service(repo))
            .await;

        assert!(
            res.status_code.is_some_and(|status| status.is_client_error()),
            "expected a client error, got {:?}",
            res.status_code
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_invalid_price_returns_400() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::InvalidData));

        let res = TestClient::put("http://example.com/products/12")
            .json(&body())
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_deleted_product_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put("http://example.com/products/12")
            .json(&body())
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
