//! Resource operations on the character ledger.
//!
//! Each operation checks its precondition first and returns
//! [`MechError::Rejected`](crate::MechError::Rejected) without touching the
//! ledger when it fails. On success it returns the events it produced, in
//! order. Operations that are a no-op by rule (resting at zero hits, setting a
//! condition to its current value) succeed with no events.

use serde::{Deserialize, Serialize};

use crate::advancement::{self, Advance};
use crate::dice::{DiceSource, d3_from_d6};
use crate::error::{MechResult, Rejection};
use crate::event::LedgerEvent;
use crate::sheet::{CharacterLedger, Condition, DRIVE_LEN, TRAUMA_LINES};

/// What a point of leverage is spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageUse {
    /// Patch someone up.
    Doc,
    /// Chase a dream.
    Dream,
    /// Train; also marks experience.
    Train,
}

impl LeverageUse {
    /// Parse a use from its name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "doc" => Some(Self::Doc),
            "dream" => Some(Self::Dream),
            "train" => Some(Self::Train),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeverageUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Doc => write!(f, "doc"),
            Self::Dream => write!(f, "dream"),
            Self::Train => write!(f, "train"),
        }
    }
}

/// A single ledger mutation requested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetAction {
    /// Mark the hit box at this zero-based index.
    TakeHit(usize),
    /// Recover one hit.
    Rest,
    /// Spend the stunt point at this zero-based index.
    UseStunt(usize),
    /// Refill stunt points.
    RefreshStunts,
    /// Gain one stunt point.
    BonusStunt,
    /// Roll for leverage.
    GainLeverage,
    /// Gain one leverage.
    BonusLeverage,
    /// Spend one leverage.
    SpendLeverage(LeverageUse),
    /// Mark one experience.
    MarkExperience,
    /// Set or clear a condition.
    SetCondition(Condition, bool),
    /// Cycle the drive box at this zero-based index.
    ToggleDrive(usize),
    /// Write a trauma line.
    SetTrauma(usize, String),
    /// Refill gear rolls.
    ResetGearRolls,
    /// Spend gear rolls.
    SpendGearRolls(u32),
    /// Spend experience on an advance.
    Advance(Advance),
}

impl CharacterLedger {
    /// Apply a host action, rolling from `dice` where the action needs it.
    pub fn apply<D: DiceSource + ?Sized>(
        &mut self,
        action: SheetAction,
        dice: &mut D,
    ) -> MechResult<Vec<LedgerEvent>> {
        match action {
            SheetAction::TakeHit(index) => self.take_hit(index),
            SheetAction::Rest => Ok(self.rest()),
            SheetAction::UseStunt(index) => self.use_stunt(index),
            SheetAction::RefreshStunts => Ok(self.refresh_stunts()),
            SheetAction::BonusStunt => self.bonus_stunt(),
            SheetAction::GainLeverage => Ok(self.gain_leverage(dice)),
            SheetAction::BonusLeverage => self.bonus_leverage(),
            SheetAction::SpendLeverage(used_for) => self.spend_leverage(used_for),
            SheetAction::MarkExperience => self.mark_experience(),
            SheetAction::SetCondition(condition, on) => Ok(self.set_condition(condition, on)),
            SheetAction::ToggleDrive(index) => self.toggle_drive(index),
            SheetAction::SetTrauma(line, text) => self.set_trauma(line, text),
            SheetAction::ResetGearRolls => Ok(self.reset_gear_rolls()),
            SheetAction::SpendGearRolls(cost) => self.spend_gear_rolls(cost),
            SheetAction::Advance(choice) => advancement::advance(self, choice),
        }
    }

    /// Mark the hit box at `index`, filling every box before it.
    ///
    /// Only unmarked boxes can be marked. Filling the last box emits
    /// [`LedgerEvent::TraumaSuffered`] instead of [`LedgerEvent::HitTaken`].
    pub fn take_hit(&mut self, index: usize) -> MechResult<Vec<LedgerEvent>> {
        let max = self.hits.max as usize;
        if index >= max {
            return Err(Rejection::BoxOutOfRange { index, len: max }.into());
        }
        if index < self.hits.value as usize {
            return Err(Rejection::HitBoxMarked { index }.into());
        }
        self.hits.set(index as u32 + 1);
        let hits = self.hits;
        if hits.is_full() {
            Ok(vec![LedgerEvent::TraumaSuffered { hits }])
        } else {
            Ok(vec![LedgerEvent::HitTaken { hits }])
        }
    }

    /// Recover one hit. Nothing happens at zero.
    pub fn rest(&mut self) -> Vec<LedgerEvent> {
        if !self.hits.try_spend(1) {
            return Vec::new();
        }
        vec![LedgerEvent::Rested { hits: self.hits }]
    }

    /// Spend the held stunt point at `index`; every point from there up is
    /// spent with it.
    pub fn use_stunt(&mut self, index: usize) -> MechResult<Vec<LedgerEvent>> {
        if index >= self.stunt_points.value as usize {
            return Err(Rejection::StuntNotHeld { index }.into());
        }
        self.stunt_points.set(index as u32);
        Ok(vec![LedgerEvent::StuntUsed {
            stunt_points: self.stunt_points,
        }])
    }

    /// Refill stunt points.
    pub fn refresh_stunts(&mut self) -> Vec<LedgerEvent> {
        self.stunt_points.refill();
        vec![LedgerEvent::StuntsRefreshed {
            stunt_points: self.stunt_points,
        }]
    }

    /// Gain one stunt point.
    pub fn bonus_stunt(&mut self) -> MechResult<Vec<LedgerEvent>> {
        if self.stunt_points.is_full() {
            return Err(Rejection::StuntsFull.into());
        }
        self.stunt_points.add_capped(1);
        Ok(vec![LedgerEvent::BonusStunt {
            stunt_points: self.stunt_points,
        }])
    }

    /// Roll a d6, halve it into a d3, and stash as much as fits.
    pub fn gain_leverage<D: DiceSource + ?Sized>(&mut self, dice: &mut D) -> Vec<LedgerEvent> {
        let d6 = dice.roll_d6(1).first().copied().unwrap_or(1);
        let d3 = d3_from_d6(d6);
        let gained = self.stash.add_capped(u32::from(d3));
        vec![LedgerEvent::LeverageGained {
            d6,
            d3,
            gained,
            stash: self.stash,
        }]
    }

    /// Stash one leverage.
    pub fn bonus_leverage(&mut self) -> MechResult<Vec<LedgerEvent>> {
        if self.stash.is_full() {
            return Err(Rejection::StashFull.into());
        }
        self.stash.add_capped(1);
        Ok(vec![LedgerEvent::BonusLeverage { stash: self.stash }])
    }

    /// Spend one leverage. Training also marks experience unless it is full.
    pub fn spend_leverage(&mut self, used_for: LeverageUse) -> MechResult<Vec<LedgerEvent>> {
        if !self.stash.try_spend(1) {
            return Err(Rejection::NoLeverage.into());
        }
        let mut events = vec![LedgerEvent::LeverageSpent {
            used_for,
            stash: self.stash,
        }];
        if used_for == LeverageUse::Train && self.experience.add_capped(1) == 1 {
            events.push(LedgerEvent::ExperienceMarked {
                experience: self.experience,
            });
        }
        Ok(events)
    }

    /// Mark one experience.
    pub fn mark_experience(&mut self) -> MechResult<Vec<LedgerEvent>> {
        if self.experience.is_full() {
            return Err(Rejection::ExperienceFull.into());
        }
        self.experience.add_capped(1);
        Ok(vec![LedgerEvent::ExperienceMarked {
            experience: self.experience,
        }])
    }

    /// Set a condition directly.
    pub fn set_condition(&mut self, condition: Condition, on: bool) -> Vec<LedgerEvent> {
        if !self.conditions.set(condition, on) {
            return Vec::new();
        }
        if on {
            vec![LedgerEvent::ConditionGained { condition }]
        } else {
            vec![LedgerEvent::ConditionCleared { condition }]
        }
    }

    /// Cycle a drive box: empty → ticked → crossed → empty.
    pub fn toggle_drive(&mut self, index: usize) -> MechResult<Vec<LedgerEvent>> {
        let state = self.drive.toggle(index).ok_or(Rejection::BoxOutOfRange {
            index,
            len: DRIVE_LEN,
        })?;
        Ok(vec![LedgerEvent::DriveToggled { index, state }])
    }

    /// Write (or clear, with blank text) a trauma line.
    pub fn set_trauma(&mut self, line: usize, text: String) -> MechResult<Vec<LedgerEvent>> {
        if line >= TRAUMA_LINES {
            return Err(Rejection::TraumaOutOfRange { line }.into());
        }
        if self.traumas.lines()[line] == text {
            return Ok(Vec::new());
        }
        self.traumas.set(line, text.clone());
        Ok(vec![LedgerEvent::TraumaRecorded { line, text }])
    }

    /// Refill gear rolls.
    pub fn reset_gear_rolls(&mut self) -> Vec<LedgerEvent> {
        self.gear_rolls.refill();
        vec![LedgerEvent::GearRollsReset {
            gear_rolls: self.gear_rolls,
        }]
    }

    /// Spend `cost` gear rolls.
    pub fn spend_gear_rolls(&mut self, cost: u32) -> MechResult<Vec<LedgerEvent>> {
        if !self.gear_rolls.try_spend(cost) {
            return Err(Rejection::InsufficientGearRolls {
                cost,
                available: self.gear_rolls.value,
            }
            .into());
        }
        Ok(vec![LedgerEvent::GearRollsSpent {
            cost,
            gear_rolls: self.gear_rolls,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::error::MechError;
    use crate::sheet::{Counter, DriveBox};

    fn rejected(result: MechResult<Vec<LedgerEvent>>) -> Rejection {
        match result {
            Err(MechError::Rejected(r)) => r,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn take_hit_marks_up_to_index() {
        let mut ledger = CharacterLedger::default();
        let events = ledger.take_hit(1).unwrap();
        assert_eq!(ledger.hits.value, 2);
        assert_eq!(
            events,
            vec![LedgerEvent::HitTaken {
                hits: Counter::new(2, 3)
            }]
        );
    }

    #[test]
    fn last_hit_box_signals_trauma() {
        let mut ledger = CharacterLedger::default();
        ledger.hits.set(2);
        let events = ledger.take_hit(2).unwrap();
        assert_eq!(ledger.hits.value, 3);
        assert_eq!(
            events,
            vec![LedgerEvent::TraumaSuffered {
                hits: Counter::new(3, 3)
            }]
        );
    }

    #[test]
    fn marked_hit_box_rejected() {
        let mut ledger = CharacterLedger::default();
        ledger.hits.set(2);
        assert_eq!(
            rejected(ledger.take_hit(0)),
            Rejection::HitBoxMarked { index: 0 }
        );
        assert_eq!(ledger.hits.value, 2);
    }

    #[test]
    fn hit_box_past_max_rejected() {
        let mut ledger = CharacterLedger::default();
        assert_eq!(
            rejected(ledger.take_hit(3)),
            Rejection::BoxOutOfRange { index: 3, len: 3 }
        );
    }

    #[test]
    fn rest_floors_at_zero() {
        let mut ledger = CharacterLedger::default();
        assert!(ledger.rest().is_empty());
        ledger.hits.set(2);
        assert_eq!(ledger.rest().len(), 1);
        assert_eq!(ledger.hits.value, 1);
    }

    #[test]
    fn use_stunt_requires_held_point() {
        let mut ledger = CharacterLedger::default();
        ledger.use_stunt(1).unwrap();
        assert_eq!(ledger.stunt_points.value, 1);
        assert_eq!(
            rejected(ledger.use_stunt(1)),
            Rejection::StuntNotHeld { index: 1 }
        );
        ledger.use_stunt(0).unwrap();
        assert!(ledger.stunt_points.is_empty());
    }

    #[test]
    fn refresh_and_bonus_stunts() {
        let mut ledger = CharacterLedger::default();
        assert_eq!(rejected(ledger.bonus_stunt()), Rejection::StuntsFull);
        ledger.use_stunt(0).unwrap();
        ledger.bonus_stunt().unwrap();
        assert_eq!(ledger.stunt_points.value, 1);
        ledger.refresh_stunts();
        assert!(ledger.stunt_points.is_full());
    }

    #[test]
    fn gain_leverage_halves_d6_and_caps() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.set(4);
        let mut dice = ScriptedDice::new([5]);
        let events = ledger.gain_leverage(&mut dice);
        assert_eq!(
            events,
            vec![LedgerEvent::LeverageGained {
                d6: 5,
                d3: 3,
                gained: 1,
                stash: Counter::new(5, 5)
            }]
        );
    }

    #[test]
    fn gain_leverage_when_full_gains_nothing() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.refill();
        let mut dice = ScriptedDice::new([6]);
        let events = ledger.gain_leverage(&mut dice);
        assert!(matches!(
            events[0],
            LedgerEvent::LeverageGained { gained: 0, .. }
        ));
    }

    #[test]
    fn bonus_leverage_rejected_when_full() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.refill();
        assert_eq!(rejected(ledger.bonus_leverage()), Rejection::StashFull);
    }

    #[test]
    fn spend_leverage_needs_stash() {
        let mut ledger = CharacterLedger::default();
        assert_eq!(
            rejected(ledger.spend_leverage(LeverageUse::Doc)),
            Rejection::NoLeverage
        );
    }

    #[test]
    fn train_marks_experience() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.set(2);
        let events = ledger.spend_leverage(LeverageUse::Train).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(ledger.stash.value, 1);
        assert_eq!(ledger.experience.value, 1);
    }

    #[test]
    fn train_at_full_experience_still_spends() {
        let mut ledger = CharacterLedger::default();
        ledger.stash.set(1);
        ledger.experience.refill();
        let events = ledger.spend_leverage(LeverageUse::Train).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(ledger.stash.value, 0);
        assert_eq!(ledger.experience.value, 15);
    }

    #[test]
    fn mark_experience_at_cap_rejected() {
        let mut ledger = CharacterLedger::default();
        ledger.experience.refill();
        assert_eq!(rejected(ledger.mark_experience()), Rejection::ExperienceFull);
        assert_eq!(ledger.experience.value, 15);
    }

    #[test]
    fn set_condition_emits_on_change_only() {
        let mut ledger = CharacterLedger::default();
        assert_eq!(
            ledger.set_condition(Condition::Afraid, true),
            vec![LedgerEvent::ConditionGained {
                condition: Condition::Afraid
            }]
        );
        assert!(ledger.set_condition(Condition::Afraid, true).is_empty());
        assert_eq!(
            ledger.set_condition(Condition::Afraid, false),
            vec![LedgerEvent::ConditionCleared {
                condition: Condition::Afraid
            }]
        );
    }

    #[test]
    fn toggle_drive_cycles() {
        let mut ledger = CharacterLedger::default();
        ledger.toggle_drive(9).unwrap();
        ledger.toggle_drive(9).unwrap();
        assert_eq!(ledger.drive.get(9), Some(DriveBox::Crossed));
        assert_eq!(
            rejected(ledger.toggle_drive(10)),
            Rejection::BoxOutOfRange { index: 10, len: 10 }
        );
    }

    #[test]
    fn set_trauma_adds_danger() {
        let mut ledger = CharacterLedger::default();
        ledger.set_trauma(0, "Shattered knee".into()).unwrap();
        assert_eq!(ledger.danger_pool_size(), 1);
        assert!(ledger.set_trauma(0, "Shattered knee".into()).unwrap().is_empty());
        assert_eq!(
            rejected(ledger.set_trauma(4, "x".into())),
            Rejection::TraumaOutOfRange { line: 4 }
        );
    }

    #[test]
    fn gear_roll_budget() {
        let mut ledger = CharacterLedger::default();
        ledger.spend_gear_rolls(3).unwrap();
        assert_eq!(
            rejected(ledger.spend_gear_rolls(2)),
            Rejection::InsufficientGearRolls {
                cost: 2,
                available: 1
            }
        );
        ledger.reset_gear_rolls();
        assert_eq!(ledger.gear_rolls.value, 4);
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut ledger = CharacterLedger::default();
        let mut dice = ScriptedDice::new([2]);
        ledger.apply(SheetAction::GainLeverage, &mut dice).unwrap();
        assert_eq!(ledger.stash.value, 1);
        ledger
            .apply(SheetAction::SetCondition(Condition::Lost, true), &mut dice)
            .unwrap();
        assert!(ledger.conditions.is_set(Condition::Lost));
    }
}
