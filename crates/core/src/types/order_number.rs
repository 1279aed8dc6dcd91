//! Customer-facing order numbers.
//!
//! Order numbers are minted from the `order_id` counter and shown to guests
//! as eight zero-padded digits (`00000042`). Values past 99,999,999 simply
//! widen; there is no overflow error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of the zero-padded decimal form.
pub const ORDER_NUMBER_WIDTH: usize = 8;

/// A minted order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderNumber(u64);

impl OrderNumber {
    /// Wrap a counter value.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// The counter value this number was minted from.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.0
    }

    /// Parse the padded decimal form. Leading zeros are optional.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok().map(Self)
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = ORDER_NUMBER_WIDTH)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid order number: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_order_number() {
        assert_eq!(OrderNumber::new(1).to_string(), "00000001");
    }

    #[test]
    fn test_hundredth_order_number() {
        assert_eq!(OrderNumber::new(100).to_string(), "00000100");
    }

    #[test]
    fn test_order_number_widens_past_eight_digits() {
        assert_eq!(OrderNumber::new(99_999_999).to_string(), "99999999");
        assert_eq!(OrderNumber::new(100_000_000).to_string(), "100000000");
    }

    #[test]
    fn test_parse_accepts_padded_and_bare() {
        assert_eq!(OrderNumber::parse("00000042"), Some(OrderNumber::new(42)));
        assert_eq!(OrderNumber::parse("42"), Some(OrderNumber::new(42)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(OrderNumber::parse(""), None);
        assert_eq!(OrderNumber::parse("-1"), None);
        assert_eq!(OrderNumber::parse("12a"), None);
    }

    #[test]
    fn test_serializes_as_padded_string() {
        let json = serde_json::to_string(&OrderNumber::new(7)).ok();
        assert_eq!(json.as_deref(), Some("\"00000007\""));
    }
}
