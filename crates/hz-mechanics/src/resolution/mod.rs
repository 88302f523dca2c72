//! Action/danger resolution.
//!
//! Roll the action pool and the danger pool, let each danger die cancel one
//! action die of the same face, then read the highest surviving action die:
//! - nothing left, or a lone 1: **botch**
//! - 1-3: failure
//! - 4-5: partial success
//! - 6: success, with one boon per natural 6 beyond the first

pub mod cancel;

pub use cancel::{Cancellation, cancel};

use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, DiceSource};

/// Highest surviving face that still counts as a failure.
const FAIL_MAX: u8 = 3;
/// Highest surviving face that still counts as a partial success.
const PARTIAL_MAX: u8 = 5;
/// The face that grants a full success and boons.
const SIX: u8 = 6;

/// Graded result of a resolution, worst first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    /// No surviving action dice, or a single surviving 1.
    Botch,
    /// Highest surviving action die is 1-3.
    Fail,
    /// Highest surviving action die is 4-5.
    Partial,
    /// Highest surviving action die is 6.
    Success,
}

impl std::fmt::Display for OutcomeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Botch => write!(f, "Botch"),
            Self::Fail => write!(f, "Failure"),
            Self::Partial => write!(f, "Partial Success"),
            Self::Success => write!(f, "Success"),
        }
    }
}

/// The full record of one resolution. Never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Action dice in roll order.
    pub action_rolls: DicePool,
    /// Danger dice in roll order.
    pub danger_rolls: DicePool,
    /// Faces that cancelled out, in match order.
    pub cancelled: DicePool,
    /// Action dice that survived cancellation.
    pub remaining_action: DicePool,
    /// Danger dice that found no match.
    pub remaining_danger: DicePool,
    /// Highest surviving action die.
    pub highest_remaining_action: Option<u8>,
    /// The graded outcome.
    pub outcome: OutcomeTier,
    /// Bonus rewards from extra natural 6s on a success.
    pub boons: u32,
}

impl ResolutionResult {
    /// Returns true if the roll botched.
    pub fn is_botch(&self) -> bool {
        self.outcome == OutcomeTier::Botch
    }
}

/// Roll both pools from `dice` and resolve them.
pub fn resolve<D: DiceSource + ?Sized>(
    dice: &mut D,
    action_count: usize,
    danger_count: usize,
) -> ResolutionResult {
    let action = DicePool::roll(dice, action_count);
    let danger = DicePool::roll(dice, danger_count);
    tracing::debug!(%action, %danger, "rolled pools");
    resolve_rolls(action, danger)
}

/// Resolve already-rolled pools.
pub fn resolve_rolls(action_rolls: DicePool, danger_rolls: DicePool) -> ResolutionResult {
    let Cancellation {
        cancelled,
        remaining_action,
        remaining_danger,
    } = cancel(&action_rolls, &danger_rolls);

    let highest = remaining_action.highest();
    let botch = matches!(remaining_action.faces(), [] | [1]);

    let outcome = match highest {
        _ if botch => OutcomeTier::Botch,
        Some(face) if face <= FAIL_MAX => OutcomeTier::Fail,
        Some(face) if face <= PARTIAL_MAX => OutcomeTier::Partial,
        Some(_) => OutcomeTier::Success,
        None => OutcomeTier::Botch,
    };

    let boons = if outcome == OutcomeTier::Success && highest == Some(SIX) {
        let sixes = action_rolls.count_of(SIX) as u32;
        sixes.saturating_sub(1)
    } else {
        0
    };

    ResolutionResult {
        action_rolls,
        danger_rolls,
        cancelled,
        remaining_action,
        remaining_danger,
        highest_remaining_action: highest,
        outcome,
        boons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn rolls(action: &[u8], danger: &[u8]) -> ResolutionResult {
        resolve_rolls(
            DicePool::from(action.to_vec()),
            DicePool::from(danger.to_vec()),
        )
    }

    #[test]
    fn zero_dice_is_a_botch() {
        let mut dice = ScriptedDice::new(Vec::new());
        let r = resolve(&mut dice, 0, 0);
        assert!(r.action_rolls.is_empty());
        assert!(r.danger_rolls.is_empty());
        assert!(r.is_botch());
        assert_eq!(r.outcome, OutcomeTier::Botch);
        assert_eq!(r.highest_remaining_action, None);
        assert_eq!(r.boons, 0);
    }

    #[test]
    fn lone_one_is_a_botch() {
        let r = rolls(&[1], &[]);
        assert_eq!(r.remaining_action.faces(), &[1]);
        assert_eq!(r.highest_remaining_action, Some(1));
        assert_eq!(r.outcome, OutcomeTier::Botch);
    }

    #[test]
    fn two_ones_are_a_failure_not_a_botch() {
        let r = rolls(&[1, 1], &[]);
        assert_eq!(r.outcome, OutcomeTier::Fail);
    }

    #[test]
    fn everything_cancelled_is_a_botch() {
        let r = rolls(&[5, 2], &[2, 5, 6]);
        assert!(r.remaining_action.is_empty());
        assert_eq!(r.remaining_danger.faces(), &[6]);
        assert_eq!(r.outcome, OutcomeTier::Botch);
    }

    #[test]
    fn six_high_success_with_boon() {
        let r = rolls(&[6, 6, 3], &[3]);
        assert_eq!(r.cancelled.faces(), &[3]);
        assert_eq!(r.remaining_action.faces(), &[6, 6]);
        assert_eq!(r.highest_remaining_action, Some(6));
        assert_eq!(r.outcome, OutcomeTier::Success);
        assert_eq!(r.boons, 1);
    }

    #[test]
    fn boons_count_original_sixes() {
        // Two sixes are cancelled, one survives: boons still count all four.
        let r = rolls(&[6, 6, 6, 6], &[6, 6]);
        assert_eq!(r.remaining_action.faces(), &[6, 6]);
        assert_eq!(r.outcome, OutcomeTier::Success);
        assert_eq!(r.boons, 3);
    }

    #[test]
    fn single_six_has_no_boon() {
        let r = rolls(&[6, 2], &[]);
        assert_eq!(r.outcome, OutcomeTier::Success);
        assert_eq!(r.boons, 0);
    }

    #[test]
    fn no_boons_without_success() {
        let r = rolls(&[6, 6, 4], &[6, 6]);
        assert_eq!(r.outcome, OutcomeTier::Partial);
        assert_eq!(r.boons, 0);
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(rolls(&[3, 2], &[]).outcome, OutcomeTier::Fail);
        assert_eq!(rolls(&[4], &[]).outcome, OutcomeTier::Partial);
        assert_eq!(rolls(&[5, 1], &[]).outcome, OutcomeTier::Partial);
        assert_eq!(rolls(&[2], &[]).outcome, OutcomeTier::Fail);
        assert_eq!(rolls(&[6], &[]).outcome, OutcomeTier::Success);
    }

    #[test]
    fn lengths_account_for_cancellation() {
        let r = rolls(&[1, 2, 3, 4, 4], &[4, 4, 4, 6]);
        assert_eq!(
            r.action_rolls.len(),
            r.remaining_action.len() + r.cancelled.len()
        );
        assert_eq!(
            r.danger_rolls.len(),
            r.remaining_danger.len() + r.cancelled.len()
        );
    }

    #[test]
    fn resolve_rolls_action_before_danger() {
        let mut dice = ScriptedDice::new([6, 6, 3, 3]);
        let r = resolve(&mut dice, 3, 1);
        assert_eq!(r.action_rolls.faces(), &[6, 6, 3]);
        assert_eq!(r.danger_rolls.faces(), &[3]);
        assert_eq!(r.boons, 1);
    }

    #[test]
    fn tier_display_and_order() {
        assert_eq!(OutcomeTier::Partial.to_string(), "Partial Success");
        assert!(OutcomeTier::Botch < OutcomeTier::Fail);
        assert!(OutcomeTier::Partial < OutcomeTier::Success);
    }
}
