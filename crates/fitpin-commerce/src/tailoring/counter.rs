//! Floored step counters.

use serde::{Deserialize, Serialize};

/// A non-negative step counter.
///
/// Increments saturate at `u32::MAX`; decrements stop at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Counter(u32);

impl Counter {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Add `steps` at once, saturating.
    pub fn add(&mut self, steps: u32) {
        self.0 = self.0.saturating_add(steps);
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Number of garments to buy. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;

    /// Clamp to at least one.
    pub fn new(value: u32) -> Self {
        Self(value.max(Self::MIN))
    }

    pub const fn get(&self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        if self.0 > Self::MIN {
            self.0 -= 1;
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_never_goes_below_zero() {
        let mut counter = Counter::default();
        for _ in 0..10 {
            counter.decrement();
            assert_eq!(counter.get(), 0);
        }
    }

    #[test]
    fn test_counter_up_and_down() {
        let mut counter = Counter::default();
        counter.increment();
        counter.increment();
        counter.decrement();
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_counter_saturates() {
        let mut counter = Counter::new(u32::MAX);
        counter.increment();
        assert_eq!(counter.get(), u32::MAX);
    }

    #[test]
    fn test_counter_add_saturates() {
        let mut counter = Counter::new(3);
        counter.add(4);
        assert_eq!(counter.get(), 7);
        counter.add(u32::MAX);
        assert_eq!(counter.get(), u32::MAX);
    }

    #[test]
    fn test_quantity_floor_is_one() {
        let mut qty = Quantity::default();
        qty.decrement();
        assert_eq!(qty.get(), 1);
        qty.increment();
        qty.increment();
        qty.decrement();
        assert_eq!(qty.get(), 2);
        assert_eq!(Quantity::new(0).get(), 1);
    }
}
