use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Maximum number of tags a special-gear item can carry.
pub const MAX_SPECIAL_TAGS: usize = 6;

/// Unique identifier for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The two kinds of item a character can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    /// Ordinary equipment.
    Gear,
    /// Signature equipment described by tags.
    SpecialGear,
}

impl ItemKind {
    /// How many items of this kind a character may own.
    pub fn capacity(self) -> usize {
        match self {
            Self::Gear => 20,
            Self::SpecialGear => 4,
        }
    }

    /// Parse a kind from a string such as "gear" or "special-gear".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gear" => Some(Self::Gear),
            "special" | "special-gear" | "special_gear" => Some(Self::SpecialGear),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gear => write!(f, "gear"),
            Self::SpecialGear => write!(f, "special-gear"),
        }
    }
}

/// A piece of equipment owned by a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier for this item.
    pub id: ItemId,
    /// Which collection the item belongs to.
    pub kind: ItemKind,
    /// Display name.
    pub name: String,
    /// Descriptive tags (special gear only).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// Create an ordinary gear item.
    pub fn gear(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            kind: ItemKind::Gear,
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// Create a special-gear item. Blank tags are dropped before the
    /// six-tag limit is checked.
    pub fn special(name: impl Into<String>, tags: Vec<String>) -> CoreResult<Self> {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tags.len() > MAX_SPECIAL_TAGS {
            return Err(CoreError::TooManyTags {
                count: tags.len(),
                max: MAX_SPECIAL_TAGS,
            });
        }
        Ok(Self {
            id: ItemId::new(),
            kind: ItemKind::SpecialGear,
            name: name.into(),
            tags,
        })
    }
}
