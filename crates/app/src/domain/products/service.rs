//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        companies::records::CompanyId,
        products::{
            data::{NewProduct, ProductSearch, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductId, ProductListing, ProductRecord},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(
        &self,
        company: CompanyId,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .repository
            .get_product(&mut tx, company, product)
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn search_products(
        &self,
        company: CompanyId,
        filters: ProductSearch,
    ) -> Result<Vec<ProductListing>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        if let Some(store) = filters.store
            && !self
                .repository
                .store_in_company(&mut tx, company, store)
                .await?
        {
            return Err(ProductsServiceError::InvalidReference);
        }

        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty());

        let products = self
            .repository
            .search_products(&mut tx, company, search, filters.store)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        company: CompanyId,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.sku.trim().is_empty()
            || update.name.trim().is_empty()
            || update.unit_name.trim().is_empty()
        {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, company, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        company: CompanyId,
        product: ProductId,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .delete_product(&mut tx, company, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single live product owned by `company`.
    async fn get_product(
        &self,
        company: CompanyId,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// List live products of `company`, optionally filtered by name and annotated with
    /// stock at one of its stores.
    async fn search_products(
        &self,
        company: CompanyId,
        filters: ProductSearch,
    ) -> Result<Vec<ProductListing>, ProductsServiceError>;

    /// Creates a catalog product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace the catalog fields of a live product.
    async fn update_product(
        &self,
        company: CompanyId,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Deleted products can no longer be added to carts.
    async fn delete_product(
        &self,
        company: CompanyId,
        product: ProductId,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            companies::{
                CompaniesService,
                data::{NewCompany, NewStore},
            },
            stock::StockService,
        },
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_catalog_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "SKU-1", 1_500))
            .await?;

        assert!(product.id.is_valid());
        assert_eq!(product.company_id, ctx.company);
        assert_eq!(product.sku, "SKU-1");
        assert_eq!(product.sale_price, 1_500);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .products
            .create_product(new_product(&ctx, "SKU-2", 900))
            .await?;

        let product = ctx.products.get_product(ctx.company, created.id).await?;

        assert_eq!(product.id, created.id);
        assert_eq!(product.name, created.name);
        assert_eq!(product.sale_price, 900);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .get_product(ctx.company, ProductId::from_i64(4_242))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "SKU-3", 100))
            .await?;

        ctx.products.delete_product(ctx.company, product.id).await?;

        let result = ctx.products.get_product(ctx.company, product.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "SKU-4", 100))
            .await?;

        ctx.products.delete_product(ctx.company, product.id).await?;

        let result = ctx.products.delete_product(ctx.company, product.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_not_visible_to_other_company() -> TestResult {
        let ctx = TestContext::new().await;

        let other = ctx
            .companies
            .create_company(NewCompany {
                name: "Other Co".to_string(),
            })
            .await?;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "SKU-5", 100))
            .await?;

        let result = ctx.products.get_product(other.id, product.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound for cross-company access, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn negative_sale_price_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product(&ctx, "SKU-6", -1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    fn product_update(sku: &str, name: &str, sale_price: i64) -> ProductUpdate {
        ProductUpdate {
            sku: sku.to_string(),
            name: name.to_string(),
            purchase_price: 100,
            sale_price,
            unit_name: "box".to_string(),
        }
    }

    #[tokio::test]
    async fn search_matches_name_substring_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let mut tea = new_product(&ctx, "TEA-1", 300);
        tea.name = "Green Tea".to_string();
        let tea = ctx.products.create_product(tea).await?;

        let mut coffee = new_product(&ctx, "COF-1", 400);
        coffee.name = "Coffee Beans".to_string();
        ctx.products.create_product(coffee).await?;

        let found = ctx
            .products
            .search_products(
                ctx.company,
                ProductSearch {
                    search: Some("  tEa ".to_string()),
                    store: None,
                },
            )
            .await?;

        let ids: Vec<_> = found.iter().map(|listing| listing.product.id).collect();
        assert_eq!(ids, vec![tea.id]);
        assert!(found.iter().all(|listing| listing.stock.is_none()));

        Ok(())
    }

    #[tokio::test]
    async fn search_skips_deleted_and_foreign_products() -> TestResult {
        let ctx = TestContext::new().await;

        let kept = ctx
            .products
            .create_product(new_product(&ctx, "KEEP", 100))
            .await?;
        let dropped = ctx
            .products
            .create_product(new_product(&ctx, "DROP", 100))
            .await?;
        ctx.products.delete_product(ctx.company, dropped.id).await?;

        let other = ctx
            .companies
            .create_company(NewCompany {
                name: "Other Co".to_string(),
            })
            .await?;
        let mut foreign = new_product(&ctx, "FOREIGN", 100);
        foreign.company = other.id;
        ctx.products.create_product(foreign).await?;

        let found = ctx
            .products
            .search_products(ctx.company, ProductSearch::default())
            .await?;

        let ids: Vec<_> = found.iter().map(|listing| listing.product.id).collect();
        assert_eq!(ids, vec![kept.id]);

        Ok(())
    }

    #[tokio::test]
    async fn search_with_store_reports_stock_or_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let mut stocked = new_product(&ctx, "STOCKED", 100);
        stocked.name = "A stocked".to_string();
        let stocked = ctx.products.create_product(stocked).await?;

        let mut empty = new_product(&ctx, "EMPTY", 100);
        empty.name = "B empty".to_string();
        ctx.products.create_product(empty).await?;

        ctx.stock.set_quantity(ctx.store, stocked.id, 12).await?;

        let found = ctx
            .products
            .search_products(
                ctx.company,
                ProductSearch {
                    search: None,
                    store: Some(ctx.store),
                },
            )
            .await?;

        let stock: Vec<_> = found.iter().map(|listing| listing.stock).collect();
        assert_eq!(stock, vec![Some(12), Some(0)]);

        Ok(())
    }

    #[tokio::test]
    async fn search_with_foreign_store_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let other = ctx
            .companies
            .create_company(NewCompany {
                name: "Other Co".to_string(),
            })
            .await?;
        let foreign = ctx
            .companies
            .create_store(NewStore {
                company: other.id,
                name: "Foreign Store".to_string(),
            })
            .await?;

        let result = ctx
            .products
            .search_products(
                ctx.company,
                ProductSearch {
                    search: None,
                    store: Some(foreign.id),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_catalog_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "OLD", 100))
            .await?;

        let updated = ctx
            .products
            .update_product(ctx.company, product.id, product_update("NEW", "Renamed", 250))
            .await?;

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.sku, "NEW");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.sale_price, 250);
        assert_eq!(updated.unit_name, "box");

        let fetched = ctx.products.get_product(ctx.company, product.id).await?;
        assert_eq!(fetched.sku, "NEW");

        Ok(())
    }

    #[tokio::test]
    async fn update_deleted_product_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "GONE", 100))
            .await?;
        ctx.products.delete_product(ctx.company, product.id).await?;

        let result = ctx
            .products
            .update_product(ctx.company, product.id, product_update("GONE", "Gone", 100))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_with_blank_name_returns_missing_required_data() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "BLANK", 100))
            .await?;

        let result = ctx
            .products
            .update_product(ctx.company, product.id, product_update("BLANK", "  ", 100))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_with_negative_price_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(new_product(&ctx, "NEG", 100))
            .await?;

        let result = ctx
            .products
            .update_product(ctx.company, product.id, product_update("NEG", "Negative", -5))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }
}
