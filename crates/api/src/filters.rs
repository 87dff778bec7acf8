//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

use clinic_commerce_core::format_amount;

/// Format a decimal amount with thousands separators.
///
/// Usage in templates: `{{ line.unit_price|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let text = value.to_string();
    let parsed = text.parse::<Decimal>();
    Ok(parsed.map_or(text, format_amount))
}
