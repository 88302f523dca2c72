//! Capped counters (hits, stunt points, stash, experience, gear rolls).
//!
//! A counter is a `(value, max)` pair that never lets `value` exceed `max`.
//! Whether an operation clamps or is rejected is decided by the caller in
//! `resources`; the counter itself only guarantees the invariant.

use serde::{Deserialize, Serialize};

/// A non-negative value with an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Current value, always `<= max`.
    pub value: u32,
    /// Upper bound.
    pub max: u32,
}

impl Counter {
    /// Create a counter, clamping `value` to `max`.
    pub fn new(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// A counter starting at its maximum.
    pub fn full(max: u32) -> Self {
        Self::new(max, max)
    }

    /// A counter starting at zero.
    pub fn empty(max: u32) -> Self {
        Self::new(0, max)
    }

    /// Returns true if the value is at its maximum.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Returns true if the value is zero.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// How much can still be added before reaching max.
    pub fn room(&self) -> u32 {
        self.max.saturating_sub(self.value)
    }

    /// Set the value, clamped to max.
    pub fn set(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    /// Set the value to max.
    pub fn refill(&mut self) {
        self.value = self.max;
    }

    /// Add up to `amount`, stopping at max. Returns how much was added.
    pub fn add_capped(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.room());
        self.value += added;
        added
    }

    /// Subtract `amount` if available. Returns false (and changes nothing)
    /// when the value is too small.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.value < amount {
            return false;
        }
        self.value -= amount;
        true
    }

    /// Change the maximum, pulling the value down if needed.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.value = self.value.min(max);
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_value() {
        let c = Counter::new(9, 4);
        assert_eq!(c.value, 4);
        assert!(c.is_full());
    }

    #[test]
    fn add_capped_reports_gain() {
        let mut c = Counter::new(3, 5);
        assert_eq!(c.add_capped(3), 2);
        assert_eq!(c.value, 5);
        assert_eq!(c.add_capped(1), 0);
    }

    #[test]
    fn try_spend_rejects_overdraw() {
        let mut c = Counter::new(2, 4);
        assert!(!c.try_spend(3));
        assert_eq!(c.value, 2);
        assert!(c.try_spend(2));
        assert!(c.is_empty());
    }

    #[test]
    fn set_max_pulls_value_down() {
        let mut c = Counter::full(5);
        c.set_max(3);
        assert_eq!(c, Counter::new(3, 3));
    }

    #[test]
    fn room_and_refill() {
        let mut c = Counter::empty(4);
        assert_eq!(c.room(), 4);
        c.refill();
        assert_eq!(c.room(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Counter::new(1, 3).to_string(), "1/3");
    }
}
