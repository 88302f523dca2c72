//! Spending experience on advances.
//!
//! Every advance costs [`ADVANCE_COST`] experience. Trademarks and edges are
//! narrative unlocks with no ledger effect beyond the cost; the other two
//! raise a capacity, up to a hard ceiling.

use serde::{Deserialize, Serialize};

use crate::error::{MechResult, Rejection};
use crate::event::LedgerEvent;
use crate::sheet::CharacterLedger;

/// Experience spent per advance.
pub const ADVANCE_COST: u32 = 5;
/// Ceiling for the hit maximum.
pub const MAX_HITS: u32 = 4;
/// Ceiling for the stunt-point maximum.
pub const MAX_STUNTS: u32 = 5;

/// An upgrade bought with experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advance {
    /// A new trademark.
    Trademark,
    /// A new edge.
    Edge,
    /// One more hit box.
    Hits,
    /// One more stunt point.
    Stunts,
}

impl Advance {
    /// Every advance, in menu order.
    pub const ALL: [Advance; 4] = [Self::Trademark, Self::Edge, Self::Hits, Self::Stunts];

    /// Parse an advance name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trademark" => Some(Self::Trademark),
            "edge" => Some(Self::Edge),
            "hits" | "hit" => Some(Self::Hits),
            "stunts" | "stunt" => Some(Self::Stunts),
            _ => None,
        }
    }

    /// Returns true if this advance has reached its ceiling on `ledger`.
    fn is_maxed(self, ledger: &CharacterLedger) -> bool {
        match self {
            Self::Trademark | Self::Edge => false,
            Self::Hits => ledger.hits.max >= MAX_HITS,
            Self::Stunts => ledger.stunt_points.max >= MAX_STUNTS,
        }
    }
}

impl std::fmt::Display for Advance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trademark => write!(f, "trademark"),
            Self::Edge => write!(f, "edge"),
            Self::Hits => write!(f, "hits"),
            Self::Stunts => write!(f, "stunts"),
        }
    }
}

/// Spend experience on `choice`. Rejected without change when experience is
/// short or the capacity is already at its ceiling.
pub fn advance(ledger: &mut CharacterLedger, choice: Advance) -> MechResult<Vec<LedgerEvent>> {
    if ledger.experience.value < ADVANCE_COST {
        return Err(Rejection::InsufficientExperience {
            needed: ADVANCE_COST,
            available: ledger.experience.value,
        }
        .into());
    }
    if choice.is_maxed(ledger) {
        return Err(Rejection::AdvanceMaxed { advance: choice }.into());
    }

    ledger.experience.try_spend(ADVANCE_COST);
    match choice {
        Advance::Trademark | Advance::Edge => {}
        Advance::Hits => ledger.hits.set_max(ledger.hits.max + 1),
        Advance::Stunts => ledger.stunt_points.set_max(ledger.stunt_points.max + 1),
    }
    tracing::info!(advance = %choice, experience = %ledger.experience, "advanced");

    Ok(vec![LedgerEvent::Advanced {
        advance: choice,
        experience: ledger.experience,
    }])
}

/// The advances `ledger` could take right now.
pub fn available_advances(ledger: &CharacterLedger) -> Vec<Advance> {
    if ledger.experience.value < ADVANCE_COST {
        return Vec::new();
    }
    Advance::ALL
        .into_iter()
        .filter(|a| !a.is_maxed(ledger))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MechError;

    fn with_xp(xp: u32) -> CharacterLedger {
        let mut ledger = CharacterLedger::default();
        ledger.experience.set(xp);
        ledger
    }

    #[test]
    fn hits_advance_raises_max() {
        let mut ledger = with_xp(5);
        advance(&mut ledger, Advance::Hits).unwrap();
        assert_eq!(ledger.hits.max, 4);
        assert_eq!(ledger.experience.value, 0);
    }

    #[test]
    fn hits_advance_rejected_at_ceiling() {
        let mut ledger = with_xp(12);
        ledger.hits.set_max(4);
        let err = advance(&mut ledger, Advance::Hits).unwrap_err();
        assert!(matches!(
            err,
            MechError::Rejected(Rejection::AdvanceMaxed {
                advance: Advance::Hits
            })
        ));
        assert_eq!(ledger.experience.value, 12);
    }

    #[test]
    fn stunts_advance_up_to_five() {
        let mut ledger = with_xp(15);
        advance(&mut ledger, Advance::Stunts).unwrap();
        advance(&mut ledger, Advance::Stunts).unwrap();
        assert_eq!(ledger.stunt_points.max, 5);
        assert!(advance(&mut ledger, Advance::Stunts).is_err());
        assert_eq!(ledger.experience.value, 5);
    }

    #[test]
    fn narrative_advances_only_cost_experience() {
        let mut ledger = with_xp(7);
        let before = ledger.clone();
        advance(&mut ledger, Advance::Trademark).unwrap();
        assert_eq!(ledger.experience.value, 2);
        assert_eq!(ledger.hits, before.hits);
        assert_eq!(ledger.stunt_points, before.stunt_points);
    }

    #[test]
    fn insufficient_experience_rejected() {
        let mut ledger = with_xp(4);
        let err = advance(&mut ledger, Advance::Edge).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::InsufficientExperience {
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn available_lists_unmaxed() {
        assert!(available_advances(&with_xp(4)).is_empty());
        let mut ledger = with_xp(5);
        ledger.hits.set_max(4);
        assert_eq!(
            available_advances(&ledger),
            vec![Advance::Trademark, Advance::Edge, Advance::Stunts]
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!(Advance::parse("Hits"), Some(Advance::Hits));
        assert_eq!(Advance::parse("stunt"), Some(Advance::Stunts));
        assert_eq!(Advance::parse("wings"), None);
    }
}
