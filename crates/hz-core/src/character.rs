use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::item::{Item, ItemKind};

/// Unique identifier for every character on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Generate a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A player character as the host persists it.
///
/// The ledger is deliberately untyped here: older records may be missing
/// fields or use legacy shapes, and the mechanics crate decodes whatever it
/// finds into defaults instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier for this character.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Raw ledger fields, addressed by nested key paths such as `hits.value`.
    #[serde(default)]
    pub ledger: Map<String, Value>,
    /// Owned gear and special-gear items.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Timestamp when the character was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the character was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Character {
    /// Create a new character with a random ID and an empty ledger.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(CharacterId::new(), name)
    }

    /// Create a character with a pre-assigned ID.
    pub fn with_id(id: CharacterId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            ledger: Map::new(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Items of one kind, in the order they were created.
    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Number of items of one kind.
    pub fn item_count(&self, kind: ItemKind) -> usize {
        self.items_of(kind).count()
    }

    /// Find an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        let lower = name.trim().to_lowercase();
        self.items.iter().find(|item| item.name.to_lowercase() == lower)
    }

    /// Mark the record as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
