//! Stock service.
//!
//! Manual stock adjustment. Checkout decrements go through the orders service inside
//! its own transaction.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        companies::records::StoreId,
        products::records::ProductId,
        stock::{errors::StockServiceError, records::StockRecord, repository::PgStockRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgStockService {
    db: Db,
    repository: PgStockRepository,
}

impl PgStockService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgStockRepository::new(),
        }
    }
}

#[async_trait]
impl StockService for PgStockService {
    async fn set_quantity(
        &self,
        store: StoreId,
        product: ProductId,
        quantity: i64,
    ) -> Result<StockRecord, StockServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .set_quantity(&mut tx, store, product, quantity)
            .await?;

        tx.commit().await?;

        tracing::info!(
            store = %store,
            product = %product,
            quantity,
            "stock quantity set"
        );

        Ok(record)
    }

    async fn get_stock(
        &self,
        store: StoreId,
        product: ProductId,
    ) -> Result<StockRecord, StockServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_stock(&mut tx, store, product).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait StockService: Send + Sync {
    /// Create or overwrite the stock record for a store and product.
    async fn set_quantity(
        &self,
        store: StoreId,
        product: ProductId,
        quantity: i64,
    ) -> Result<StockRecord, StockServiceError>;

    /// Retrieve the stock record for a store and product.
    async fn get_stock(
        &self,
        store: StoreId,
        product: ProductId,
    ) -> Result<StockRecord, StockServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_product};

    use super::*;

    #[tokio::test]
    async fn set_quantity_creates_then_overwrites() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "STOCK-1", 100).await?;

        let first = ctx.stock.set_quantity(ctx.store, product.id, 10).await?;
        let second = ctx.stock.set_quantity(ctx.store, product.id, 3).await?;

        assert_eq!(first.quantity, 10);
        assert_eq!(second.quantity, 3);

        let stored = ctx.stock.get_stock(ctx.store, product.id).await?;

        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.store_id, ctx.store);
        assert_eq!(stored.product_id, product.id);

        Ok(())
    }

    #[tokio::test]
    async fn get_stock_without_record_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "STOCK-2", 100).await?;

        let result = ctx.stock.get_stock(ctx.store, product.id).await;

        assert!(
            matches!(result, Err(StockServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_for_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .stock
            .set_quantity(ctx.store, ProductId::from_i64(9_999), 5)
            .await;

        assert!(
            matches!(result, Err(StockServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn decrement_may_go_negative() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "STOCK-3", 100).await?;
        let repository = PgStockRepository::new();

        ctx.stock.set_quantity(ctx.store, product.id, 1).await?;

        let mut tx = ctx.db.begin_test_transaction().await;

        let rows = repository
            .decrement(&mut tx, ctx.store, product.id, 4)
            .await?;

        let record = repository.get_stock(&mut tx, ctx.store, product.id).await?;

        assert_eq!(rows, 1);
        assert_eq!(record.quantity, -3);

        Ok(())
    }

    #[tokio::test]
    async fn decrement_without_record_touches_no_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "STOCK-4", 100).await?;

        let mut tx = ctx.db.begin_test_transaction().await;

        let rows = PgStockRepository::new()
            .decrement(&mut tx, ctx.store, product.id, 1)
            .await?;

        assert_eq!(rows, 0);

        Ok(())
    }
}
