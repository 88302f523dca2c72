//! Retirement: a final roll driven by the drive track.
//!
//! Ticked boxes become action dice and every other box (empty or crossed)
//! becomes a danger die, so the two pools always total ten. A botch is a
//! catastrophe that costs every *other* character a drive box; applying that
//! is the table's job, not this module's.

use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::resolution::{OutcomeTier, ResolutionResult, resolve};
use crate::sheet::{DRIVE_LEN, DriveTrack};

/// How a retirement plays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum RetirementVerdict {
    /// Everything falls apart, and the fallout reaches the rest of the crew.
    Catastrophe,
    /// The character leaves with nothing.
    Fail,
    /// The character gets out, at a price.
    Partial,
    /// A clean exit, with leverage to pass on.
    Success {
        /// Leverage tokens the character can hand to others.
        leverage_tokens: u32,
    },
}

impl RetirementVerdict {
    fn from_result(result: &ResolutionResult) -> Self {
        match result.outcome {
            OutcomeTier::Botch => Self::Catastrophe,
            OutcomeTier::Fail => Self::Fail,
            OutcomeTier::Partial => Self::Partial,
            OutcomeTier::Success => Self::Success {
                leverage_tokens: result.boons,
            },
        }
    }

    /// Returns true for a catastrophe.
    pub fn is_catastrophe(&self) -> bool {
        matches!(self, Self::Catastrophe)
    }
}

impl std::fmt::Display for RetirementVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catastrophe => write!(f, "catastrophic failure: everyone else loses a drive box"),
            Self::Fail => write!(f, "retires with nothing to show for it"),
            Self::Partial => write!(f, "retires, but it costs them"),
            Self::Success { leverage_tokens: 0 } => write!(f, "retires in style"),
            Self::Success { leverage_tokens } => {
                write!(f, "retires in style, leaving {leverage_tokens} leverage to the crew")
            }
        }
    }
}

/// The roll and its reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementResult {
    /// The underlying resolution.
    pub roll: ResolutionResult,
    /// What it means for the retiring character.
    pub verdict: RetirementVerdict,
}

/// Action and danger pool sizes for a drive track.
pub fn retirement_pools(drive: &DriveTrack) -> (usize, usize) {
    let ticked = drive.ticked();
    (ticked, DRIVE_LEN - ticked)
}

/// Roll retirement for a drive track.
pub fn resolve_retirement<D: DiceSource + ?Sized>(
    drive: &DriveTrack,
    dice: &mut D,
) -> RetirementResult {
    let (action, danger) = retirement_pools(drive);
    let roll = resolve(dice, action, danger);
    let verdict = RetirementVerdict::from_result(&roll);
    tracing::debug!(action, danger, ?verdict, "resolved retirement");
    RetirementResult { roll, verdict }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::sheet::DriveBox;

    fn track(ticked: usize, crossed: usize) -> DriveTrack {
        DriveTrack::from_boxes(
            std::iter::repeat_n(DriveBox::Ticked, ticked)
                .chain(std::iter::repeat_n(DriveBox::Crossed, crossed)),
        )
    }

    #[test]
    fn pools_always_total_ten() {
        assert_eq!(retirement_pools(&track(0, 0)), (0, 10));
        assert_eq!(retirement_pools(&track(3, 4)), (3, 7));
        assert_eq!(retirement_pools(&track(10, 0)), (10, 0));
    }

    #[test]
    fn no_ticks_is_catastrophe() {
        let mut dice = ScriptedDice::new([2; 10]);
        let result = resolve_retirement(&track(0, 2), &mut dice);
        assert!(result.roll.action_rolls.is_empty());
        assert_eq!(result.roll.danger_rolls.len(), 10);
        assert!(result.verdict.is_catastrophe());
    }

    #[test]
    fn success_reports_leverage_tokens() {
        // Two ticked boxes roll 6, 6; eight danger dice roll 2.
        let mut faces = vec![6, 6];
        faces.extend([2; 8]);
        let mut dice = ScriptedDice::new(faces);
        let result = resolve_retirement(&track(2, 0), &mut dice);
        assert_eq!(
            result.verdict,
            RetirementVerdict::Success { leverage_tokens: 1 }
        );
    }

    #[test]
    fn partial_when_highest_is_five() {
        let mut faces = vec![5, 3];
        faces.extend([3; 8]);
        let mut dice = ScriptedDice::new(faces);
        let result = resolve_retirement(&track(2, 0), &mut dice);
        assert_eq!(result.roll.remaining_action.faces(), &[5]);
        assert_eq!(result.verdict, RetirementVerdict::Partial);
    }
}
