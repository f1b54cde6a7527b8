//! Fixed-point amount formatting for the processor API.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places the processor expects.
pub const AMOUNT_DECIMALS: u32 = 8;

/// Formats an order total as the processor's amount string.
///
/// Exactly 8 fractional digits, `.` separator, no grouping separators;
/// midpoints round away from zero.
pub fn format_amount(total: Decimal) -> String {
    let rounded =
        total.round_dp_with_strategy(AMOUNT_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.8}", rounded)
}
