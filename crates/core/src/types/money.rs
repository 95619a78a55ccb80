//! Money formatting helpers.
//!
//! The upstream API carries prices as plain JSON numbers in US dollars, so
//! amounts are `rust_decimal::Decimal` everywhere and only formatted at the
//! display edge.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to two decimal places for display totals.
///
/// Uses away-from-zero midpoint rounding to match what a customer expects
/// from a price label.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two decimal places, e.g. `"20.00"`.
///
/// Templates prepend the currency symbol.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(2);
    rounded.to_string()
}
