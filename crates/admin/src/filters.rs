//! Custom Askama template filters.

use std::fmt::Display;

use rust_decimal::Decimal;

use fakestore_core::types::format_amount;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount with exactly two fraction digits.
///
/// Usage in templates: `${{ product.price|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let amount = value
        .to_string()
        .parse::<Decimal>()
        .map(format_amount)
        .unwrap_or_default();
    Ok(amount)
}
