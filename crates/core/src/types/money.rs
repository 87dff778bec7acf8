//! Money display formatting.
//!
//! Prices are carried as [`rust_decimal::Decimal`] everywhere; this module
//! only concerns itself with rendering them for receipts and logs.

use rust_decimal::Decimal;

/// Format an amount with thousands separators, e.g. `1,250,000` or `19.5`.
///
/// Trailing fractional zeros are dropped; the currency symbol is supplied by
/// the caller (store configuration), not baked in here.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_amount(Decimal::from(0)), "0");
        assert_eq!(format_amount(Decimal::from(250)), "250");
        assert_eq!(format_amount(Decimal::from(999)), "999");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_amount(Decimal::from(1_000)), "1,000");
        assert_eq!(format_amount(Decimal::from(1_250_000)), "1,250,000");
        assert_eq!(format_amount(Decimal::from(12_345_678)), "12,345,678");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(Decimal::from(-1_000)), "-1,000");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_amount(Decimal::new(12345, 1)), "1,234.5");
        // trailing zeros dropped
        assert_eq!(format_amount(Decimal::new(150_00, 2)), "150");
    }
}
