//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartProduct, NewCartLine},
            errors::CartsServiceError,
            records::{CartLineId, CartLineView},
            repository::PgCartLinesRepository,
        },
        companies::records::StoreId,
        pricing::{Discount, compute_price},
        products::PgProductsRepository,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn upsert_line(&self, line: NewCartLine) -> Result<CartLineId, CartsServiceError> {
        let price = compute_price(line.base_price, line.discount);

        let mut tx = self.db.begin_transaction().await?;

        let id = self
            .lines_repository
            .upsert_line(&mut tx, &line, &price)
            .await?;

        tx.commit().await?;

        debug!(
            line = %id,
            user = %line.user,
            store = %line.store,
            product = %line.product,
            quantity = line.quantity,
            sale_price = price.sale_price,
            "cart line upserted"
        );

        Ok(id)
    }

    async fn add_product(&self, selection: CartProduct) -> Result<CartLineId, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, selection.company, selection.product)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                error => CartsServiceError::from(error),
            })?;

        let line = NewCartLine {
            user: selection.user,
            store: selection.store,
            product: product.id,
            quantity: selection.quantity,
            base_price: product.sale_price,
            discount: Discount::NONE,
        };

        let price = compute_price(line.base_price, line.discount);

        let id = self
            .lines_repository
            .upsert_line(&mut tx, &line, &price)
            .await?;

        tx.commit().await?;

        debug!(
            line = %id,
            user = %line.user,
            store = %line.store,
            product = %line.product,
            quantity = line.quantity,
            "product added to cart"
        );

        Ok(id)
    }

    async fn edit_quantity(
        &self,
        user: UserId,
        line: CartLineId,
        quantity: u32,
    ) -> Result<bool, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .lines_repository
            .update_quantity(&mut tx, user, line, quantity)
            .await?;

        tx.commit().await?;

        Ok(rows_affected > 0)
    }

    async fn delete_line(&self, user: UserId, line: CartLineId) -> Result<bool, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .lines_repository
            .delete_line(&mut tx, user, line)
            .await?;

        tx.commit().await?;

        Ok(rows_affected > 0)
    }

    async fn list_lines(
        &self,
        user: UserId,
        store: StoreId,
    ) -> Result<Vec<CartLineView>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let lines = self.lines_repository.list_lines(&mut tx, user, store).await?;

        tx.commit().await?;

        Ok(lines)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Insert a priced line, or merge it into the user's existing line for the same
    /// store and product. Returns the line id.
    async fn upsert_line(&self, line: NewCartLine) -> Result<CartLineId, CartsServiceError>;

    /// Add a catalog product to the cart at its current sale price.
    async fn add_product(&self, selection: CartProduct) -> Result<CartLineId, CartsServiceError>;

    /// Replace the quantity of one of the user's lines. `false` when no line matched.
    async fn edit_quantity(
        &self,
        user: UserId,
        line: CartLineId,
        quantity: u32,
    ) -> Result<bool, CartsServiceError>;

    /// Delete one of the user's lines. `false` when no line matched.
    async fn delete_line(&self, user: UserId, line: CartLineId) -> Result<bool, CartsServiceError>;

    /// The user's lines at a store, in insertion order.
    async fn list_lines(
        &self,
        user: UserId,
        store: StoreId,
    ) -> Result<Vec<CartLineView>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::{OrdersService, data::CheckoutRequest},
            pricing::DiscountType,
            products::{ProductsService, records::ProductId},
            stock::StockService,
        },
        test::{
            TestContext,
            helpers::{create_product, new_line},
        },
    };

    use super::*;

    #[tokio::test]
    async fn upsert_line_creates_priced_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-1", 1_000).await?;

        let id = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 2, 1_000, Discount::percentage(10)))
            .await?;

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, id);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].price.discount_amount, 100);
        assert_eq!(lines[0].price.sale_price, 900);
        assert_eq!(lines[0].product_name, product.name);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_into_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-2", 1_000).await?;

        let first = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 2, 1_000, Discount::fixed(50)))
            .await?;

        let second = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 3, 800, Discount::percentage(25)))
            .await?;

        assert_eq!(first, second);

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].price.base_price, 800);
        assert_eq!(lines[0].price.discount.kind, DiscountType::Percentage);
        assert_eq!(lines[0].price.discount_amount, 200);
        assert_eq!(lines[0].price.sale_price, 600);

        Ok(())
    }

    #[tokio::test]
    async fn percentage_above_one_hundred_is_stored_clamped() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-3", 1_000).await?;

        ctx.carts
            .upsert_line(new_line(&ctx, product.id, 1, 1_000, Discount::percentage(150)))
            .await?;

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines[0].price.discount, Discount::percentage(100));
        assert_eq!(lines[0].price.discount_amount, 1_000);
        assert_eq!(lines[0].price.sale_price, 0);

        Ok(())
    }

    #[tokio::test]
    async fn lines_are_separate_per_store() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-4", 500).await?;
        let other_store = ctx.create_store("Branch B").await;

        let mut line = new_line(&ctx, product.id, 1, 500, Discount::NONE);

        let first = ctx.carts.upsert_line(line.clone()).await?;

        line.store = other_store;

        let second = ctx.carts.upsert_line(line).await?;

        assert_ne!(first, second);
        assert_eq!(ctx.carts.list_lines(ctx.user, ctx.store).await?.len(), 1);
        assert_eq!(ctx.carts.list_lines(ctx.user, other_store).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn list_lines_reports_stock_or_zero() -> TestResult {
        let ctx = TestContext::new().await;
        let stocked = create_product(&ctx, "CART-5", 100).await?;
        let unstocked = create_product(&ctx, "CART-6", 100).await?;

        ctx.stock.set_quantity(ctx.store, stocked.id, 7).await?;

        ctx.carts
            .upsert_line(new_line(&ctx, stocked.id, 1, 100, Discount::NONE))
            .await?;

        ctx.carts
            .upsert_line(new_line(&ctx, unstocked.id, 1, 100, Discount::NONE))
            .await?;

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, stocked.id);
        assert_eq!(lines[0].stock_quantity, 7);
        assert_eq!(lines[1].product_id, unstocked.id);
        assert_eq!(lines[1].stock_quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_product_uses_catalog_sale_price_without_discount() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-7", 1_250).await?;

        let id = ctx
            .carts
            .add_product(CartProduct {
                company: ctx.company,
                user: ctx.user,
                store: ctx.store,
                product: product.id,
                quantity: 3,
            })
            .await?;

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines[0].id, id);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price.base_price, 1_250);
        assert_eq!(lines[0].price.discount, Discount::NONE);
        assert_eq!(lines[0].price.sale_price, 1_250);

        Ok(())
    }

    #[tokio::test]
    async fn merge_past_u32_quantity_is_refused_and_cart_stays_usable() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-BIG", 1).await?;

        let selection = CartProduct {
            company: ctx.company,
            user: ctx.user,
            store: ctx.store,
            product: product.id,
            quantity: 3_000_000_000,
        };

        let id = ctx.carts.add_product(selection).await?;
        let result = ctx.carts.add_product(selection).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let lines = ctx.carts.list_lines(ctx.user, ctx.store).await?;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, id);
        assert_eq!(lines[0].quantity, 3_000_000_000);

        ctx.stock
            .set_quantity(ctx.store, product.id, 3_000_000_000)
            .await?;

        ctx.orders
            .create_order(CheckoutRequest {
                user: ctx.user,
                store: ctx.store,
                payment_cash: 3_000_000_000,
                payment_non_cash: 0,
                date: "2026-03-01".to_string(),
            })
            .await?;

        assert!(ctx.carts.list_lines(ctx.user, ctx.store).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_product_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_product(CartProduct {
                company: ctx.company,
                user: ctx.user,
                store: ctx.store,
                product: ProductId::from_i64(12_345),
                quantity: 1,
            })
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_product_deleted_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-8", 100).await?;

        ctx.products.delete_product(ctx.company, product.id).await?;

        let result = ctx
            .carts
            .add_product(CartProduct {
                company: ctx.company,
                user: ctx.user,
                store: ctx.store,
                product: product.id,
                quantity: 1,
            })
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
        assert!(ctx.carts.list_lines(ctx.user, ctx.store).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn edit_quantity_replaces_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-9", 100).await?;

        let id = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 4, 100, Discount::NONE))
            .await?;

        let updated = ctx.carts.edit_quantity(ctx.user, id, 1).await?;

        assert!(updated);
        assert_eq!(ctx.carts.list_lines(ctx.user, ctx.store).await?[0].quantity, 1);

        Ok(())
    }

    #[tokio::test]
    async fn edit_quantity_of_other_users_line_matches_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-10", 100).await?;
        let other_user = ctx.create_user("other@example.test").await;

        let id = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 4, 100, Discount::NONE))
            .await?;

        let updated = ctx.carts.edit_quantity(other_user, id, 1).await?;

        assert!(!updated);
        assert_eq!(ctx.carts.list_lines(ctx.user, ctx.store).await?[0].quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn delete_line_removes_it_once() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "CART-11", 100).await?;

        let id = ctx
            .carts
            .upsert_line(new_line(&ctx, product.id, 1, 100, Discount::NONE))
            .await?;

        assert!(ctx.carts.delete_line(ctx.user, id).await?);
        assert!(!ctx.carts.delete_line(ctx.user, id).await?);
        assert!(ctx.carts.list_lines(ctx.user, ctx.store).await?.is_empty());

        Ok(())
    }
}
