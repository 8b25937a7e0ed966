//! Won amounts.
//!
//! Prices are whole Korean won; there is no minor unit, so the amount is a
//! plain integer.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in Korean won.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Won(i64);

impl Won {
    /// Zero won.
    pub const ZERO: Won = Won(0);

    /// Create a new amount.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Raw amount.
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add another amount, failing on overflow.
    pub fn checked_add(self, other: Won) -> Result<Won, CommerceError> {
        self.0
            .checked_add(other.0)
            .map(Won)
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity, failing on overflow.
    pub fn checked_mul(self, quantity: u32) -> Result<Won, CommerceError> {
        self.0
            .checked_mul(i64::from(quantity))
            .map(Won)
            .ok_or(CommerceError::Overflow)
    }

    /// Format with thousands separators and the won sign (e.g., "₩39,000").
    pub fn display(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}\u{20a9}{}", sign, grouped)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<i64> for Won {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Won::new(0).display(), "\u{20a9}0");
        assert_eq!(Won::new(999).display(), "\u{20a9}999");
        assert_eq!(Won::new(1_000).display(), "\u{20a9}1,000");
        assert_eq!(Won::new(39_000).display(), "\u{20a9}39,000");
        assert_eq!(Won::new(1_234_567).display(), "\u{20a9}1,234,567");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Won::new(-5_000).display(), "-\u{20a9}5,000");
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Won::new(39_000).checked_add(Won::new(5_000)).unwrap(),
            Won::new(44_000)
        );
        assert_eq!(
            Won::new(i64::MAX).checked_add(Won::new(1)),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_checked_mul() {
        assert_eq!(Won::new(10_000).checked_mul(3).unwrap(), Won::new(30_000));
        assert!(Won::new(i64::MAX).checked_mul(2).is_err());
    }
}
