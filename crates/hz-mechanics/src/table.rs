//! The table: a roster, a dice source, and a notifier wired together.
//!
//! Every operation follows the same flow: decode the character's ledger,
//! roll and compute, persist the changed fields as one patch, then announce.
//! Rejections change nothing, are announced as warnings, and are returned as
//! [`MechError::Rejected`] so the host can decide how loudly to report them.
//!
//! All mutating operations take `&mut self`, so a table serializes access to
//! its roster. Hosts that share one across threads wrap it in a mutex.

use hz_core::{Character, CharacterId, CoreError, Item, ItemId, ItemStore, LedgerStore, Roster};

use crate::dice::DiceSource;
use crate::error::{MechError, MechResult, Rejection};
use crate::event::LedgerEvent;
use crate::gear_roll::{GearRollReport, GearRollRequest, resolve_gear_roll};
use crate::notify::{Announcement, Notifier};
use crate::resolution::{ResolutionResult, resolve};
use crate::resources::SheetAction;
use crate::retirement::{RetirementResult, resolve_retirement};
use crate::sheet::CharacterLedger;

/// A running game: characters, dice, and whoever hears about outcomes.
#[derive(Debug)]
pub struct Table<D, N> {
    roster: Roster,
    dice: D,
    notifier: N,
}

impl<D: DiceSource, N: Notifier> Table<D, N> {
    /// Seat a roster at the table.
    pub fn new(roster: Roster, dice: D, notifier: N) -> Self {
        Self {
            roster,
            dice,
            notifier,
        }
    }

    /// The characters at the table.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Take the roster and notifier back, e.g. to persist and flush them.
    pub fn into_parts(self) -> (Roster, N) {
        (self.roster, self.notifier)
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Resolve a character name to its ID.
    pub fn id_of(&self, name: &str) -> MechResult<CharacterId> {
        Ok(self.roster.id_of(name)?)
    }

    /// Add a character with a default ledger.
    pub fn create_character(&mut self, name: &str) -> MechResult<CharacterId> {
        let mut character = Character::new(name.trim());
        character.ledger = CharacterLedger::default().to_data();
        let id = self.roster.add(character)?;
        tracing::info!(character = name.trim(), %id, "character created");
        Ok(id)
    }

    /// Remove a character and return its record.
    pub fn delete_character(&mut self, id: CharacterId) -> MechResult<Character> {
        let character = self.roster.remove(id)?;
        tracing::info!(character = %character.name, %id, "character deleted");
        Ok(character)
    }

    /// Decode a character's current ledger.
    pub fn ledger(&self, id: CharacterId) -> MechResult<CharacterLedger> {
        Ok(CharacterLedger::from_character(self.roster.require(id)?))
    }

    /// Roll `action` dice against the danger pool the character's conditions
    /// and traumas call for.
    pub fn roll_action(&mut self, id: CharacterId, action: usize) -> MechResult<ResolutionResult> {
        let danger = self.ledger(id)?.danger_pool_size();
        self.roll_pools(id, action, danger)
    }

    /// Roll explicit pool sizes for a character.
    pub fn roll_pools(
        &mut self,
        id: CharacterId,
        action: usize,
        danger: usize,
    ) -> MechResult<ResolutionResult> {
        let character = self.roster.require(id)?.name.clone();
        let result = resolve(&mut self.dice, action, danger);
        tracing::debug!(%character, outcome = %result.outcome, boons = result.boons, "roll resolved");
        self.notifier.announce(&Announcement::Roll {
            character,
            result: result.clone(),
        });
        Ok(result)
    }

    /// Apply one ledger action.
    pub fn apply(&mut self, id: CharacterId, action: SheetAction) -> MechResult<Vec<LedgerEvent>> {
        let (name, events) = self.mutate(id, |ledger, dice| ledger.apply(action, dice))?;
        self.announce_events(&name, &events);
        Ok(events)
    }

    /// Make a gear roll.
    pub fn gear_roll(
        &mut self,
        id: CharacterId,
        request: GearRollRequest,
    ) -> MechResult<GearRollReport> {
        let (character, report) =
            self.mutate(id, |ledger, dice| resolve_gear_roll(ledger, &request, dice))?;
        self.notifier.announce(&Announcement::GearRoll {
            character,
            report: report.clone(),
        });
        Ok(report)
    }

    /// Make a gear roll against an item's tag count.
    pub fn gear_roll_for_item(
        &mut self,
        id: CharacterId,
        item_name: &str,
        modifier: i32,
        stash_bonus: u32,
    ) -> MechResult<GearRollReport> {
        let item = self
            .roster
            .require(id)?
            .find_item(item_name)
            .ok_or_else(|| CoreError::UnknownItem(item_name.to_string()))?;
        let target = u32::try_from(item.tags.len()).unwrap_or(u32::MAX);
        let request = GearRollRequest::new(target)
            .with_modifier(modifier)
            .with_stash_bonus(stash_bonus);
        self.gear_roll(id, request)
    }

    /// Roll a character's retirement. On a catastrophe every other character
    /// loses a drive box.
    pub fn retire(&mut self, id: CharacterId) -> MechResult<RetirementResult> {
        let character = self.roster.require(id)?;
        let name = character.name.clone();
        let drive = CharacterLedger::from_character(character).drive;

        let result = resolve_retirement(&drive, &mut self.dice);
        tracing::info!(character = %name, verdict = ?result.verdict, "retirement rolled");
        self.notifier.announce(&Announcement::Retirement {
            character: name,
            result: result.clone(),
        });

        if result.verdict.is_catastrophe() {
            for other in self.roster.ids() {
                if other == id {
                    continue;
                }
                let (other_name, crossed) =
                    self.mutate(other, |ledger, _| Ok(ledger.drive.cross_one()))?;
                if let Some(index) = crossed {
                    self.announce_events(&other_name, &[LedgerEvent::DriveCrossed { index }]);
                }
            }
        }
        Ok(result)
    }

    /// Give a character an item. A full collection is a rejection.
    pub fn add_item(&mut self, id: CharacterId, item: Item) -> MechResult<ItemId> {
        let character = self.roster.require(id)?;
        let name = character.name.clone();
        let capacity = item.kind.capacity();
        if character.item_count(item.kind) >= capacity {
            return Err(self.reject(
                name,
                Rejection::ItemCapacity {
                    kind: item.kind,
                    capacity,
                },
            ));
        }
        let event = LedgerEvent::ItemAdded {
            kind: item.kind,
            name: item.name.clone(),
        };
        let item_id = self.roster.create_item(id, item)?;
        self.announce_events(&name, &[event]);
        Ok(item_id)
    }

    /// Take an item away by name.
    pub fn remove_item(&mut self, id: CharacterId, item_name: &str) -> MechResult<Item> {
        let character = self.roster.require(id)?;
        let name = character.name.clone();
        let item_id = character
            .find_item(item_name)
            .ok_or_else(|| CoreError::UnknownItem(item_name.to_string()))?
            .id;
        let item = self.roster.delete_item(id, item_id)?;
        self.announce_events(
            &name,
            &[LedgerEvent::ItemRemoved {
                kind: item.kind,
                name: item.name.clone(),
            }],
        );
        Ok(item)
    }

    /// Run `op` against a decoded copy of the ledger and persist whatever it
    /// changed. Returns the character's name alongside the op's value.
    fn mutate<T>(
        &mut self,
        id: CharacterId,
        op: impl FnOnce(&mut CharacterLedger, &mut D) -> MechResult<T>,
    ) -> MechResult<(String, T)> {
        let character = self.roster.require(id)?;
        let name = character.name.clone();
        let before = CharacterLedger::from_character(character);
        let mut after = before.clone();

        match op(&mut after, &mut self.dice) {
            Ok(value) => {
                let patch = after.changes_since(&before);
                if !patch.is_empty() {
                    self.roster.update_ledger(id, &patch)?;
                    tracing::debug!(character = %name, fields = patch.len(), "ledger patched");
                }
                Ok((name, value))
            }
            Err(MechError::Rejected(rejection)) => Err(self.reject(name, rejection)),
            Err(e) => Err(e),
        }
    }

    fn reject(&mut self, character: String, rejection: Rejection) -> MechError {
        tracing::warn!(%character, %rejection, "operation rejected");
        self.notifier.announce(&Announcement::Warning {
            character,
            rejection: rejection.clone(),
        });
        MechError::Rejected(rejection)
    }

    fn announce_events(&mut self, character: &str, events: &[LedgerEvent]) {
        for event in events {
            if event.is_grave() {
                tracing::info!(%character, %event, "grave ledger event");
            }
            self.notifier.announce(&Announcement::Ledger {
                character: character.to_string(),
                event: event.clone(),
            });
        }
    }
}
