//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::PgCartLinesRepository,
        orders::{
            checkout::{CheckoutState, CheckoutTransaction},
            data::CheckoutRequest,
            errors::{CheckoutAbort, OrdersServiceError},
            records::{OrderId, OrderRecord},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
        },
        stock::PgStockRepository,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    lines_repository: PgOrderLinesRepository,
    carts_repository: PgCartLinesRepository,
    stock_repository: PgStockRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            lines_repository: PgOrderLinesRepository::new(),
            carts_repository: PgCartLinesRepository::new(),
            stock_repository: PgStockRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, request: CheckoutRequest) -> Result<OrderId, OrdersServiceError> {
        let (mut checkout, validated) = CheckoutTransaction::begin(
            &self.carts_repository,
            &self.orders_repository,
            &self.lines_repository,
            &self.stock_repository,
            &request,
        )?;

        let mut tx = match self.db.begin_transaction().await {
            Ok(tx) => tx,
            Err(error) => {
                checkout.abort();

                return Err(CheckoutAbort::Storage(error).into());
            }
        };

        let result = match checkout.run(&mut tx, &validated, Timestamp::now()).await {
            Ok(order) => tx
                .commit()
                .await
                .map(|()| order)
                .map_err(CheckoutAbort::Storage),
            Err(abort) => {
                if let Err(error) = tx.rollback().await {
                    warn!(error = %error, "checkout rollback failed");
                }

                Err(abort)
            }
        };

        match result {
            Ok(order) => {
                checkout.advance(CheckoutState::Committed);

                info!(
                    order = %order,
                    user = %validated.user,
                    store = %validated.store,
                    "checkout committed"
                );

                Ok(order)
            }
            Err(abort) => {
                let failed_in = checkout.abort();

                warn!(
                    user = %validated.user,
                    store = %validated.store,
                    state = %failed_in,
                    reason = %abort,
                    "checkout aborted"
                );

                Err(abort.into())
            }
        }
    }

    async fn get_order(
        &self,
        user: UserId,
        order: OrderId,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self
            .orders_repository
            .get_order(&mut tx, user, order)
            .await?;

        let lines = self.lines_repository.list_lines(&mut tx, order).await?;

        tx.commit().await?;

        record.lines.extend(lines);

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Check out the user's cart at a store into a new sales order, atomically.
    async fn create_order(&self, request: CheckoutRequest) -> Result<OrderId, OrdersServiceError>;

    /// Retrieve an order placed by `user`, with its lines.
    async fn get_order(
        &self,
        user: UserId,
        order: OrderId,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
