//! Gear rolls: does the character have the right kit on them?
//!
//! A gear roll spends `1 + |modifier|` from the session's gear-roll budget,
//! optionally burns stash for a flat bonus, and rolls one d6 against a target
//! between 1 and 6 (usually an item's tag count).

use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::error::{MechResult, Rejection};
use crate::event::LedgerEvent;
use crate::sheet::CharacterLedger;

/// Lowest allowed target.
pub const MIN_TARGET: u32 = 1;
/// Highest allowed target.
pub const MAX_TARGET: u32 = 6;

/// Parameters for one gear roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearRollRequest {
    /// Total needed to succeed, 1-6.
    pub target: u32,
    /// Added to the roll; every point either way costs one more gear roll.
    pub modifier: i32,
    /// Stash spent for a flat bonus.
    pub stash_bonus: u32,
}

impl GearRollRequest {
    /// A plain roll against `target`.
    pub fn new(target: u32) -> Self {
        Self {
            target,
            modifier: 0,
            stash_bonus: 0,
        }
    }

    /// Set the modifier.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the stash bonus.
    pub fn with_stash_bonus(mut self, stash_bonus: u32) -> Self {
        self.stash_bonus = stash_bonus;
        self
    }

    /// Gear rolls this request costs.
    pub fn cost(&self) -> u32 {
        1 + self.modifier.unsigned_abs()
    }
}

/// What a gear roll did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearRollReport {
    /// The face rolled.
    pub d6: u8,
    /// Modifier applied.
    pub modifier: i32,
    /// Stash spent as a bonus.
    pub stash_bonus: u32,
    /// Gear rolls spent.
    pub cost: u32,
    /// `d6 + modifier + stash_bonus`, widened so legacy counters can't overflow it.
    pub total: i64,
    /// Total needed.
    pub target: u32,
    /// Whether the total met the target.
    pub success: bool,
    /// Ledger changes the roll paid for.
    pub events: Vec<LedgerEvent>,
}

impl std::fmt::Display for GearRollReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d6 {}", self.d6)?;
        if self.modifier != 0 {
            write!(f, " {:+}", self.modifier)?;
        }
        if self.stash_bonus > 0 {
            write!(f, " +{} stash", self.stash_bonus)?;
        }
        let verdict = if self.success { "has it" } else { "doesn't have it" };
        write!(f, " = {} vs {}: {verdict}", self.total, self.target)
    }
}

/// Pay for and roll a gear roll. Rejected without change when the target is
/// out of range, gear rolls are short, or the stash can't cover the bonus.
pub fn resolve_gear_roll<D: DiceSource + ?Sized>(
    ledger: &mut CharacterLedger,
    request: &GearRollRequest,
    dice: &mut D,
) -> MechResult<GearRollReport> {
    if !(MIN_TARGET..=MAX_TARGET).contains(&request.target) {
        return Err(Rejection::TargetOutOfRange {
            target: request.target,
        }
        .into());
    }
    let cost = request.cost();
    if ledger.gear_rolls.value < cost {
        return Err(Rejection::InsufficientGearRolls {
            cost,
            available: ledger.gear_rolls.value,
        }
        .into());
    }
    if ledger.stash.value < request.stash_bonus {
        return Err(Rejection::InsufficientStash {
            requested: request.stash_bonus,
            available: ledger.stash.value,
        }
        .into());
    }

    let mut events = ledger.spend_gear_rolls(cost)?;
    if request.stash_bonus > 0 {
        ledger.stash.try_spend(request.stash_bonus);
        events.push(LedgerEvent::StashSpent {
            amount: request.stash_bonus,
            stash: ledger.stash,
        });
    }

    let d6 = dice.roll_d6(1).first().copied().unwrap_or(1);
    let total = i64::from(d6) + i64::from(request.modifier) + i64::from(request.stash_bonus);
    let success = total >= i64::from(request.target);
    tracing::debug!(d6, total, target = request.target, success, "gear roll");

    Ok(GearRollReport {
        d6,
        modifier: request.modifier,
        stash_bonus: request.stash_bonus,
        cost,
        total,
        target: request.target,
        success,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn cost_counts_modifier_both_ways() {
        assert_eq!(GearRollRequest::new(3).cost(), 1);
        assert_eq!(GearRollRequest::new(3).with_modifier(2).cost(), 3);
        assert_eq!(GearRollRequest::new(3).with_modifier(-1).cost(), 2);
    }

    #[test]
    fn roll_spends_budget_and_stash() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.set(3);
        let request = GearRollRequest::new(5).with_modifier(1).with_stash_bonus(2);
        let mut dice = ScriptedDice::new([2]);

        let report = resolve_gear_roll(&mut ledger, &request, &mut dice).unwrap();
        assert_eq!(report.total, 5);
        assert!(report.success);
        assert_eq!(report.cost, 2);
        assert_eq!(ledger.gear_rolls.value, 2);
        assert_eq!(ledger.stash.value, 1);
        assert_eq!(report.events.len(), 2);
    }

    #[test]
    fn negative_modifier_can_fail() {
        let mut ledger = CharacterLedger::default();
        let request = GearRollRequest::new(4).with_modifier(-1);
        let mut dice = ScriptedDice::new([4]);
        let report = resolve_gear_roll(&mut ledger, &request, &mut dice).unwrap();
        assert_eq!(report.total, 3);
        assert!(!report.success);
    }

    #[test]
    fn short_budget_rejected_without_change() {
        let mut ledger = CharacterLedger::default();
        ledger.gear_rolls.set(1);
        ledger.stash.set(2);
        let request = GearRollRequest::new(3).with_modifier(1).with_stash_bonus(1);
        let err = resolve_gear_roll(&mut ledger, &request, &mut ScriptedDice::new([6])).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::InsufficientGearRolls {
                cost: 2,
                available: 1
            })
        );
        assert_eq!(ledger.gear_rolls.value, 1);
        assert_eq!(ledger.stash.value, 2);
    }

    #[test]
    fn stash_bonus_beyond_stash_rejected() {
        let mut ledger = CharacterLedger::default();
        let request = GearRollRequest::new(3).with_stash_bonus(1);
        let err = resolve_gear_roll(&mut ledger, &request, &mut ScriptedDice::new([6])).unwrap_err();
        assert_eq!(
            err.rejection(),
            Some(&Rejection::InsufficientStash {
                requested: 1,
                available: 0
            })
        );
        assert_eq!(ledger.gear_rolls.value, 4);
    }

    #[test]
    fn target_must_be_one_to_six() {
        let mut ledger = CharacterLedger::default();
        for target in [0, 7] {
            let err = resolve_gear_roll(
                &mut ledger,
                &GearRollRequest::new(target),
                &mut ScriptedDice::new([6]),
            )
            .unwrap_err();
            assert_eq!(
                err.rejection(),
                Some(&Rejection::TargetOutOfRange { target })
            );
        }
    }

    #[test]
    fn display_shows_arithmetic() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.set(1);
        let request = GearRollRequest::new(6).with_modifier(-1).with_stash_bonus(1);
        let report = resolve_gear_roll(&mut ledger, &request, &mut ScriptedDice::new([3])).unwrap();
        assert_eq!(report.to_string(), "d6 3 -1 +1 stash = 3 vs 6: doesn't have it");
    }

    #[test]
    fn huge_legacy_counters_do_not_overflow_total() {
        let data = serde_json::json!({
            "gear_rolls": { "value": 3_000_000_000u64, "max": 3_000_000_000u64 },
            "stash": { "value": 3_000_000_000u64, "max": 3_000_000_000u64 },
        });
        let serde_json::Value::Object(data) = data else {
            unreachable!()
        };

        let mut ledger = CharacterLedger::from_data(&data);
        let request = GearRollRequest::new(6).with_modifier(i32::MAX);
        let report = resolve_gear_roll(&mut ledger, &request, &mut ScriptedDice::new([6])).unwrap();
        assert_eq!(report.total, 6 + i64::from(i32::MAX));
        assert!(report.success);

        let mut ledger = CharacterLedger::from_data(&data);
        let request = GearRollRequest::new(6).with_stash_bonus(2_500_000_000);
        let report = resolve_gear_roll(&mut ledger, &request, &mut ScriptedDice::new([6])).unwrap();
        assert_eq!(report.total, 2_500_000_006);
        assert!(report.success);
        assert_eq!(ledger.stash.value, 500_000_000);
    }
}
