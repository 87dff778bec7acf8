//! Human-readable order numbers.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A human-readable order number.
///
/// Format: fixed prefix, 2-digit year, 2-digit month, then the order's
/// sequence zero-padded to 4 digits (wider once the sequence outgrows four
/// digits). The sequence is the order's database identifier, assigned inside
/// the same transaction that inserts the row, so numbers never collide under
/// concurrent order placement.
///
/// Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Fixed prefix for all order numbers.
    pub const PREFIX: &'static str = "ORD";

    /// Compose an order number from a sequence value and a point in time.
    #[must_use]
    pub fn compose(sequence: i64, at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{:02}{:02}{:04}",
            Self::PREFIX,
            at.year() % 100,
            at.month(),
            sequence
        ))
    }

    /// Wrap an already-formatted order number (e.g. read back from storage).
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_compose_zero_pads_sequence() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
        assert_eq!(OrderNumber::compose(7, at).as_str(), "ORD26030007");
    }

    #[test]
    fn test_compose_two_digit_month_and_year() {
        let at = Utc.with_ymd_and_hms(2031, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(OrderNumber::compose(42, at).as_str(), "ORD31120042");
    }

    #[test]
    fn test_compose_wide_sequence_keeps_all_digits() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(OrderNumber::compose(123_456, at).as_str(), "ORD2601123456");
    }
}
