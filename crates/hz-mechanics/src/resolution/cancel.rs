//! Pairwise cancellation of action dice by danger dice.
//!
//! Danger dice are walked in roll order. Each one that matches a face still
//! present among the action dice removes the first such action die (by roll
//! order) and is itself removed. Which instance gets removed only matters for
//! display; the surviving multisets do not depend on order.

use crate::dice::DicePool;

/// What is left after danger dice cancel action dice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancellation {
    /// Faces removed from both pools, in the order they matched.
    pub cancelled: DicePool,
    /// Surviving action dice, in roll order.
    pub remaining_action: DicePool,
    /// Surviving danger dice, in roll order.
    pub remaining_danger: DicePool,
}

/// Cancel matching faces between the two pools.
pub fn cancel(action: &DicePool, danger: &DicePool) -> Cancellation {
    let mut remaining_action = action.clone();
    let mut remaining_danger = DicePool::new();
    let mut cancelled = DicePool::new();

    for &face in danger.faces() {
        if remaining_action.remove_first(face) {
            cancelled.push(face);
        } else {
            remaining_danger.push(face);
        }
    }

    Cancellation {
        cancelled,
        remaining_action,
        remaining_danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools(action: &[u8], danger: &[u8]) -> Cancellation {
        cancel(&DicePool::from(action.to_vec()), &DicePool::from(danger.to_vec()))
    }

    #[test]
    fn single_match() {
        let c = pools(&[6, 6, 3], &[3]);
        assert_eq!(c.cancelled.faces(), &[3]);
        assert_eq!(c.remaining_action.faces(), &[6, 6]);
        assert!(c.remaining_danger.is_empty());
    }

    #[test]
    fn one_danger_die_cancels_one_action_die() {
        let c = pools(&[5, 5, 5], &[5]);
        assert_eq!(c.remaining_action.faces(), &[5, 5]);
        assert_eq!(c.cancelled.faces(), &[5]);
    }

    #[test]
    fn unmatched_danger_dice_survive_in_order() {
        let c = pools(&[2], &[4, 2, 2, 1]);
        assert_eq!(c.cancelled.faces(), &[2]);
        assert!(c.remaining_action.is_empty());
        assert_eq!(c.remaining_danger.faces(), &[4, 2, 1]);
    }

    #[test]
    fn first_action_instance_is_removed() {
        let c = pools(&[4, 1, 4, 2], &[4]);
        assert_eq!(c.remaining_action.faces(), &[1, 4, 2]);
    }

    #[test]
    fn empty_pools() {
        let c = pools(&[], &[]);
        assert!(c.cancelled.is_empty());
        assert!(c.remaining_action.is_empty());
        assert!(c.remaining_danger.is_empty());
    }
}
