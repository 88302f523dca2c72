//! The six fixed conditions.

use serde::{Deserialize, Serialize};

/// A temporary state that adds a danger die while it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Frightened.
    Afraid,
    /// Enraged.
    Angry,
    /// Worn out.
    Exhausted,
    /// Starving.
    Hungry,
    /// Hurt.
    Injured,
    /// Without bearings.
    Lost,
}

impl Condition {
    /// Every condition, in sheet order.
    pub const ALL: [Condition; 6] = [
        Self::Afraid,
        Self::Angry,
        Self::Exhausted,
        Self::Hungry,
        Self::Injured,
        Self::Lost,
    ];

    /// Key used in persisted data.
    pub fn key(self) -> &'static str {
        match self {
            Self::Afraid => "afraid",
            Self::Angry => "angry",
            Self::Exhausted => "exhausted",
            Self::Hungry => "hungry",
            Self::Injured => "injured",
            Self::Lost => "lost",
        }
    }

    /// Parse a condition key (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == lower)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Which conditions are currently marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Conditions {
    marked: [bool; 6],
}

impl Conditions {
    /// Returns true if the condition is marked.
    pub fn is_set(&self, condition: Condition) -> bool {
        self.marked[condition.index()]
    }

    /// Set a condition. Returns true if the value changed.
    pub fn set(&mut self, condition: Condition, on: bool) -> bool {
        let slot = &mut self.marked[condition.index()];
        let changed = *slot != on;
        *slot = on;
        changed
    }

    /// Marked conditions in sheet order.
    pub fn active(&self) -> impl Iterator<Item = Condition> + '_ {
        Condition::ALL.into_iter().filter(|c| self.is_set(*c))
    }

    /// Number of marked conditions.
    pub fn count(&self) -> usize {
        self.marked.iter().filter(|m| **m).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys() {
        assert_eq!(Condition::parse("Afraid"), Some(Condition::Afraid));
        assert_eq!(Condition::parse(" lost "), Some(Condition::Lost));
        assert_eq!(Condition::parse("sleepy"), None);
    }

    #[test]
    fn set_reports_change() {
        let mut c = Conditions::default();
        assert!(c.set(Condition::Hungry, true));
        assert!(!c.set(Condition::Hungry, true));
        assert!(c.is_set(Condition::Hungry));
        assert!(c.set(Condition::Hungry, false));
        assert_eq!(c.count(), 0);
    }

    #[test]
    fn active_in_sheet_order() {
        let mut c = Conditions::default();
        c.set(Condition::Lost, true);
        c.set(Condition::Afraid, true);
        let active: Vec<Condition> = c.active().collect();
        assert_eq!(active, vec![Condition::Afraid, Condition::Lost]);
        assert_eq!(c.count(), 2);
    }
}
