//! Traits the engine uses to reach whatever persists characters.
//!
//! [`crate::Roster`] implements both for in-memory use; a host can implement
//! them over its own record API.

use crate::character::CharacterId;
use crate::error::CoreResult;
use crate::item::{Item, ItemId, ItemKind};
use crate::patch::LedgerPatch;

/// Applies field-level ledger updates to a stored character.
pub trait LedgerStore {
    /// Apply every field in `patch` to the character's ledger as one unit.
    fn update_ledger(&mut self, id: CharacterId, patch: &LedgerPatch) -> CoreResult<()>;
}

/// Creates, deletes, and lists a character's items.
pub trait ItemStore {
    /// Add an item, enforcing the per-kind capacity. Returns the item's ID.
    fn create_item(&mut self, owner: CharacterId, item: Item) -> CoreResult<ItemId>;

    /// Remove an item and return it.
    fn delete_item(&mut self, owner: CharacterId, item: ItemId) -> CoreResult<Item>;

    /// List the character's items of one kind.
    fn list_items(&self, owner: CharacterId, kind: ItemKind) -> CoreResult<Vec<&Item>>;
}
