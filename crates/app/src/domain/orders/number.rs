//! Order numbers

use jiff::Timestamp;

/// Prefix of every sales order number.
pub const ORDER_NUMBER_PREFIX: &str = "TRJ";

/// Order number for an order created at `at`: the prefix, the Unix seconds as eight hex
/// digits and the microseconds as five hex digits.
///
/// Numbers are not guaranteed unique; two checkouts in the same microsecond share one.
#[must_use]
pub fn order_number(at: Timestamp) -> String {
    format!(
        "{ORDER_NUMBER_PREFIX}{:08x}{:05x}",
        at.as_second(),
        at.subsec_microsecond()
    )
}
