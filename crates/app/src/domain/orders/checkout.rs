//! Checkout
//!
//! Converts every cart line a user holds at one store into a sales order. The attempt
//! moves through [`CheckoutState`] in order:
//!
//! 1. `Pending` to `Validated`: the request is checked without touching storage. A
//!    rejected request ends here without entering the state machine.
//! 2. `CartLoaded`: the cart lines are read and locked, in insertion order.
//! 3. `TotalsComputed`: grand total, receivable and order number are derived.
//! 4. `OrderHeaderWritten`: the sales order row is inserted.
//! 5. `LinesAndStockWritten`: each line is copied onto the order and its stock is
//!    decremented.
//! 6. `CartCleared`: the consumed cart lines are deleted.
//! 7. `Committed`: the transaction commits.
//!
//! Any failure after validation moves the attempt to `Aborted` and the transaction is
//! rolled back, so an aborted checkout leaves the cart, stock and orders untouched.

use std::fmt;

use jiff::{Timestamp, civil::Date};
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::domain::{
    carts::{PgCartLinesRepository, records::CartLineRecord},
    companies::records::StoreId,
    orders::{
        data::{CheckoutRequest, NewOrder, NewOrderLine},
        errors::{CheckoutAbort, CheckoutRejection},
        number::order_number,
        records::OrderId,
        repositories::{PgOrderLinesRepository, PgOrdersRepository},
    },
    stock::PgStockRepository,
    users::records::UserId,
};

/// Progress of a single checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Request received, not yet checked.
    Pending,

    /// Request passed validation.
    Validated,

    /// Cart lines read and locked.
    CartLoaded,

    /// Totals and order number derived.
    TotalsComputed,

    /// Sales order row inserted.
    OrderHeaderWritten,

    /// Every order line inserted and its stock decremented.
    LinesAndStockWritten,

    /// Consumed cart lines deleted.
    CartCleared,

    /// Transaction committed.
    Committed,

    /// Rolled back after a failure.
    Aborted,
}

impl CheckoutState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Validated => "validated",
            Self::CartLoaded => "cart_loaded",
            Self::TotalsComputed => "totals_computed",
            Self::OrderHeaderWritten => "order_header_written",
            Self::LinesAndStockWritten => "lines_and_stock_written",
            Self::CartCleared => "cart_cleared",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkout request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    pub user: UserId,
    pub store: StoreId,
    pub payment_cash: i64,
    pub payment_non_cash: i64,
    pub date: Date,
}

/// Check a request before any storage access. The first failing check wins.
///
/// # Errors
///
/// Returns a [`CheckoutRejection`] naming the first missing or invalid field.
pub fn validate(request: &CheckoutRequest) -> Result<ValidatedCheckout, CheckoutRejection> {
    if !request.user.is_valid() {
        return Err(CheckoutRejection::MissingUser);
    }

    if !request.store.is_valid() {
        return Err(CheckoutRejection::MissingStore);
    }

    if request.payment_cash < 0 || request.payment_non_cash < 0 {
        return Err(CheckoutRejection::NegativePayment);
    }

    if request.payment_cash == 0 && request.payment_non_cash == 0 {
        return Err(CheckoutRejection::MissingPayment);
    }

    let date = request.date.trim();

    if date.is_empty() {
        return Err(CheckoutRejection::MissingDate);
    }

    let date = date
        .parse::<Date>()
        .map_err(|_error| CheckoutRejection::InvalidDate(date.to_string()))?;

    Ok(ValidatedCheckout {
        user: request.user,
        store: request.store,
        payment_cash: request.payment_cash,
        payment_non_cash: request.payment_non_cash,
        date,
    })
}

/// Money totals of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    /// Sum of every line total.
    pub grand_total: i64,

    /// `grand_total` less both payments, floored at zero.
    pub receivable: i64,

    /// `sale_price * quantity` for each line, in line order.
    pub line_totals: Vec<i64>,
}

/// Compute order totals from cart lines.
///
/// # Errors
///
/// Returns [`CheckoutAbort::Overflow`] when any product or sum leaves the `i64` range.
pub fn compute_totals(
    lines: &[CartLineRecord],
    payment_cash: i64,
    payment_non_cash: i64,
) -> Result<Totals, CheckoutAbort> {
    let line_totals = lines
        .iter()
        .map(|line| {
            line.price
                .sale_price
                .checked_mul(i64::from(line.quantity))
                .ok_or(CheckoutAbort::Overflow)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let grand_total = line_totals
        .iter()
        .try_fold(0_i64, |sum, total| sum.checked_add(*total))
        .ok_or(CheckoutAbort::Overflow)?;

    let outstanding = grand_total
        .checked_sub(payment_cash)
        .and_then(|rest| rest.checked_sub(payment_non_cash))
        .ok_or(CheckoutAbort::Overflow)?;

    Ok(Totals {
        grand_total,
        receivable: outstanding.max(0),
        line_totals,
    })
}

/// Runs the storage steps of one checkout inside a caller-owned transaction and
/// tracks which state the attempt reached.
#[derive(Debug)]
pub(crate) struct CheckoutTransaction<'a> {
    carts: &'a PgCartLinesRepository,
    orders: &'a PgOrdersRepository,
    lines: &'a PgOrderLinesRepository,
    stock: &'a PgStockRepository,
    state: CheckoutState,
}

impl<'a> CheckoutTransaction<'a> {
    /// Validate `request` and start tracking the attempt in `Validated`. A rejected
    /// request never gets a tracker.
    pub(crate) fn begin(
        carts: &'a PgCartLinesRepository,
        orders: &'a PgOrdersRepository,
        lines: &'a PgOrderLinesRepository,
        stock: &'a PgStockRepository,
        request: &CheckoutRequest,
    ) -> Result<(Self, ValidatedCheckout), CheckoutRejection> {
        let validated = validate(request)?;

        let mut checkout = Self {
            carts,
            orders,
            lines,
            stock,
            state: CheckoutState::Pending,
        };

        checkout.advance(CheckoutState::Validated);

        Ok((checkout, validated))
    }

    pub(crate) fn state(&self) -> CheckoutState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: CheckoutState) {
        debug!(from = %self.state, to = %next, "checkout state changed");

        self.state = next;
    }

    /// Mark the attempt aborted, returning the state it failed in.
    pub(crate) fn abort(&mut self) -> CheckoutState {
        let failed_in = self.state;

        self.advance(CheckoutState::Aborted);

        failed_in
    }

    /// Run every step from `Validated` up to `CartCleared`. The caller commits or
    /// rolls back `tx` depending on the result.
    pub(crate) async fn run(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        checkout: &ValidatedCheckout,
        now: Timestamp,
    ) -> Result<OrderId, CheckoutAbort> {
        let cart = self
            .carts
            .lock_lines(tx, checkout.user, checkout.store)
            .await?;

        if cart.is_empty() {
            return Err(CheckoutAbort::EmptyCart);
        }

        self.advance(CheckoutState::CartLoaded);

        let totals = compute_totals(&cart, checkout.payment_cash, checkout.payment_non_cash)?;

        let order = NewOrder {
            order_number: order_number(now),
            user: checkout.user,
            store: checkout.store,
            date: checkout.date,
            grand_total: totals.grand_total,
            payment_cash: checkout.payment_cash,
            payment_non_cash: checkout.payment_non_cash,
            receivable: totals.receivable,
        };

        self.advance(CheckoutState::TotalsComputed);

        let order_id = self.orders.insert_order(tx, &order).await?;

        self.advance(CheckoutState::OrderHeaderWritten);

        for ((position, line), total_price) in (1_i32..).zip(&cart).zip(totals.line_totals) {
            self.lines
                .insert_line(
                    tx,
                    &NewOrderLine {
                        order: order_id,
                        product: line.product_id,
                        position,
                        quantity: line.quantity,
                        price: line.price,
                        total_price,
                    },
                )
                .await?;

            let rows_affected = self
                .stock
                .decrement(tx, checkout.store, line.product_id, line.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(CheckoutAbort::MissingStock(line.product_id));
            }
        }

        self.advance(CheckoutState::LinesAndStockWritten);

        self.carts
            .clear_lines(tx, checkout.user, checkout.store)
            .await?;

        self.advance(CheckoutState::CartCleared);

        Ok(order_id)
    }
}
