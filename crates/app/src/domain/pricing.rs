//! Line pricing
//!
//! Turns a base price and a discount into the discount amount and sale price that
//! are persisted on cart lines and copied onto order lines. All amounts are in the
//! smallest currency unit.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountType {
    /// The value is an absolute amount.
    Fixed,

    /// The value is a percentage of the base price.
    Percentage,
}

impl DiscountType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Percentage => "PERCENTAGE",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown discount type \"{0}\"")]
pub struct UnknownDiscountType(pub String);

impl FromStr for DiscountType {
    type Err = UnknownDiscountType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "FIXED" => Ok(Self::Fixed),
            "PERCENTAGE" => Ok(Self::Percentage),
            other => Err(UnknownDiscountType(other.to_string())),
        }
    }
}

/// Discount requested for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    pub kind: DiscountType,
    pub value: i64,
}

impl Discount {
    /// No discount: fixed, zero.
    pub const NONE: Self = Self::fixed(0);

    #[must_use]
    pub const fn fixed(value: i64) -> Self {
        Self {
            kind: DiscountType::Fixed,
            value,
        }
    }

    #[must_use]
    pub const fn percentage(value: i64) -> Self {
        Self {
            kind: DiscountType::Percentage,
            value,
        }
    }

    /// The discount as it is applied and stored. Percentages are clamped to
    /// `0..=100`; fixed amounts are taken as given.
    #[must_use]
    pub fn effective(self) -> Self {
        match self.kind {
            DiscountType::Fixed => self,
            DiscountType::Percentage => Self::percentage(self.value.clamp(0, 100)),
        }
    }
}

/// Result of pricing a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePrice {
    pub base_price: i64,

    /// Effective discount, percentage already clamped.
    pub discount: Discount,

    pub discount_amount: i64,

    /// `base_price - discount_amount`. Negative when a fixed discount exceeds the
    /// base price.
    pub sale_price: i64,
}

/// Compute the discount amount and sale price for one unit.
#[must_use]
pub fn compute_price(base_price: i64, discount: Discount) -> LinePrice {
    let discount = discount.effective();

    let discount_amount = match discount.kind {
        DiscountType::Fixed => discount.value,
        DiscountType::Percentage => percent_of(base_price, discount.value),
    };

    LinePrice {
        base_price,
        discount,
        discount_amount,
        sale_price: base_price.saturating_sub(discount_amount),
    }
}

/// `floor(percent / 100 * amount)` for `percent` in `0..=100`, without overflow.
fn percent_of(amount: i64, percent: i64) -> i64 {
    let whole = amount.div_euclid(100);
    let remainder = amount.rem_euclid(100);

    whole * percent + (remainder * percent) / 100
}
