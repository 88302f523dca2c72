//! The table's roster: every character, indexed by ID and name, with
//! JSON load and save.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemId, ItemKind};
use crate::patch::LedgerPatch;
use crate::store::{ItemStore, LedgerStore};

/// Current roster file format version.
const ROSTER_VERSION: u32 = 1;

/// On-disk shape of a roster.
#[derive(Serialize, Deserialize)]
struct RosterFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    characters: Vec<Character>,
}

fn default_version() -> u32 {
    ROSTER_VERSION
}

/// Every character at the table. Owns the records and keeps a name index.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: HashMap<CharacterId, Character>,
    // Indexes
    order: Vec<CharacterId>,
    by_name_lower: HashMap<String, CharacterId>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Character CRUD
    // -----------------------------------------------------------------------

    /// Add a character. IDs must be unique, names unique (case-insensitive)
    /// and non-empty.
    pub fn add(&mut self, character: Character) -> CoreResult<CharacterId> {
        if self.characters.contains_key(&character.id) {
            return Err(CoreError::DuplicateId(character.id));
        }
        let name_lower = character.name.trim().to_lowercase();
        if name_lower.is_empty() {
            return Err(CoreError::EmptyName);
        }
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(CoreError::DuplicateName(character.name.clone()));
        }

        let id = character.id;
        self.order.push(id);
        self.by_name_lower.insert(name_lower, id);
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Get a reference to a character by ID.
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Get a mutable reference to a character by ID.
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Get a character by ID, or a `CharacterNotFound` error.
    pub fn require(&self, id: CharacterId) -> CoreResult<&Character> {
        self.get(id).ok_or(CoreError::CharacterNotFound(id))
    }

    fn require_mut(&mut self, id: CharacterId) -> CoreResult<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(CoreError::CharacterNotFound(id))
    }

    /// Find a character by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.by_name_lower
            .get(&name.trim().to_lowercase())
            .and_then(|id| self.characters.get(id))
    }

    /// Resolve a name to an ID, or an `UnknownCharacter` error.
    pub fn id_of(&self, name: &str) -> CoreResult<CharacterId> {
        self.find_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| CoreError::UnknownCharacter(name.to_string()))
    }

    /// Remove a character and return it.
    pub fn remove(&mut self, id: CharacterId) -> CoreResult<Character> {
        let character = self
            .characters
            .remove(&id)
            .ok_or(CoreError::CharacterNotFound(id))?;
        self.order.retain(|other| *other != id);
        self.by_name_lower.remove(&character.name.trim().to_lowercase());
        Ok(character)
    }

    /// Characters in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.order.iter().filter_map(|id| self.characters.get(id))
    }

    /// Character IDs in the order they were added.
    pub fn ids(&self) -> Vec<CharacterId> {
        self.order.clone()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster has no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    // -----------------------------------------------------------------------
    // JSON
    // -----------------------------------------------------------------------

    /// Serialize the roster to pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        let file = RosterFile {
            version: ROSTER_VERSION,
            characters: self.iter().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load a roster from JSON. Duplicate names in the file are an error.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let file: RosterFile = serde_json::from_str(json)?;
        let mut roster = Self::new();
        for character in file.characters {
            roster.add(character)?;
        }
        Ok(roster)
    }
}

impl LedgerStore for Roster {
    fn update_ledger(&mut self, id: CharacterId, patch: &LedgerPatch) -> CoreResult<()> {
        let character = self.require_mut(id)?;
        patch.apply_to(&mut character.ledger)?;
        character.touch();
        Ok(())
    }
}

impl ItemStore for Roster {
    fn create_item(&mut self, owner: CharacterId, item: Item) -> CoreResult<ItemId> {
        let character = self.require_mut(owner)?;
        let capacity = item.kind.capacity();
        if character.item_count(item.kind) >= capacity {
            return Err(CoreError::CapacityExceeded {
                kind: item.kind,
                capacity,
            });
        }
        let id = item.id;
        character.items.push(item);
        character.touch();
        Ok(id)
    }

    fn delete_item(&mut self, owner: CharacterId, item: ItemId) -> CoreResult<Item> {
        let character = self.require_mut(owner)?;
        let index = character
            .items
            .iter()
            .position(|i| i.id == item)
            .ok_or(CoreError::ItemNotFound(item))?;
        let removed = character.items.remove(index);
        character.touch();
        Ok(removed)
    }

    fn list_items(&self, owner: CharacterId, kind: ItemKind) -> CoreResult<Vec<&Item>> {
        Ok(self.require(owner)?.items_of(kind).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster_with(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            roster.add(Character::new(*name)).unwrap();
        }
        roster
    }

    #[test]
    fn add_and_find_by_name() {
        let roster = roster_with(&["Vess", "Oru"]);
        assert_eq!(roster.len(), 2);
        assert!(roster.find_by_name("vess").is_some());
        assert!(roster.find_by_name("  ORU ").is_some());
        assert!(roster.find_by_name("Nobody").is_none());
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut roster = roster_with(&["Vess"]);
        let err = roster.add(Character::new("VESS")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut roster = Roster::new();
        let vex = Character::new("Vex");
        let mut copy = vex.clone();
        copy.name = "Mara".to_string();
        roster.add(vex).unwrap();

        let err = roster.add(copy).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
        assert_eq!(roster.len(), 1);
        assert!(roster.find_by_name("Mara").is_none());
    }

    #[test]
    fn from_json_rejects_duplicate_ids() {
        let mut roster = Roster::new();
        roster.add(Character::new("Vex")).unwrap();
        let json = roster.to_json().unwrap();
        let mut file: serde_json::Value = serde_json::from_str(&json).unwrap();
        let characters = file["characters"].as_array_mut().unwrap();
        let mut copy = characters[0].clone();
        copy["name"] = serde_json::json!("Mara");
        characters.push(copy);

        let err = Roster::from_json(&file.to_string()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.add(Character::new("   ")),
            Err(CoreError::EmptyName)
        ));
    }

    #[test]
    fn remove_clears_indexes() {
        let mut roster = roster_with(&["Vess", "Oru"]);
        let id = roster.id_of("Vess").unwrap();
        let removed = roster.remove(id).unwrap();
        assert_eq!(removed.name, "Vess");
        assert!(roster.find_by_name("Vess").is_none());
        assert_eq!(roster.ids().len(), 1);
        // The name is free again.
        roster.add(Character::new("Vess")).unwrap();
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let roster = roster_with(&["Cato", "Ama", "Brin"]);
        let names: Vec<&str> = roster.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cato", "Ama", "Brin"]);
    }

    #[test]
    fn update_ledger_applies_patch() {
        let mut roster = roster_with(&["Vess"]);
        let id = roster.id_of("Vess").unwrap();
        let patch = LedgerPatch::new().with("hits.value", 2).with("hits.max", 3);
        roster.update_ledger(id, &patch).unwrap();
        let ledger = &roster.get(id).unwrap().ledger;
        assert_eq!(ledger["hits"], json!({ "value": 2, "max": 3 }));
    }

    #[test]
    fn update_ledger_unknown_character() {
        let mut roster = Roster::new();
        let err = roster
            .update_ledger(CharacterId::new(), &LedgerPatch::new())
            .unwrap_err();
        assert!(matches!(err, CoreError::CharacterNotFound(_)));
    }

    #[test]
    fn special_gear_capacity_enforced() {
        let mut roster = roster_with(&["Vess"]);
        let id = roster.id_of("Vess").unwrap();
        for i in 0..4 {
            let item = Item::special(format!("Relic {i}"), vec![]).unwrap();
            roster.create_item(id, item).unwrap();
        }
        let err = roster
            .create_item(id, Item::special("Relic 5", vec![]).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::CapacityExceeded {
                kind: ItemKind::SpecialGear,
                capacity: 4
            }
        ));
        // Gear has its own, separate capacity.
        roster.create_item(id, Item::gear("Rope")).unwrap();
        assert_eq!(roster.list_items(id, ItemKind::Gear).unwrap().len(), 1);
    }

    #[test]
    fn gear_capacity_is_twenty() {
        let mut roster = roster_with(&["Vess"]);
        let id = roster.id_of("Vess").unwrap();
        for i in 0..20 {
            roster.create_item(id, Item::gear(format!("Thing {i}"))).unwrap();
        }
        assert!(roster.create_item(id, Item::gear("One too many")).is_err());
    }

    #[test]
    fn delete_item_returns_it() {
        let mut roster = roster_with(&["Vess"]);
        let id = roster.id_of("Vess").unwrap();
        let item_id = roster.create_item(id, Item::gear("Rope")).unwrap();
        let removed = roster.delete_item(id, item_id).unwrap();
        assert_eq!(removed.name, "Rope");
        assert!(matches!(
            roster.delete_item(id, item_id),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_order_and_ledger() {
        let mut roster = roster_with(&["Vess", "Oru"]);
        let id = roster.id_of("Oru").unwrap();
        roster
            .update_ledger(id, &LedgerPatch::new().with("stash.value", 4))
            .unwrap();

        let json = roster.to_json().unwrap();
        let loaded = Roster::from_json(&json).unwrap();
        let names: Vec<&str> = loaded.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Vess", "Oru"]);
        assert_eq!(loaded.get(id).unwrap().ledger["stash"]["value"], json!(4));
    }

    #[test]
    fn from_json_accepts_missing_version() {
        let loaded = Roster::from_json(r#"{ "characters": [] }"#).unwrap();
        assert!(loaded.is_empty());
    }
}
