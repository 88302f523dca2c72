use crate::character::CharacterId;
use crate::item::{ItemId, ItemKind};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating the roster.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested character ID does not exist in the roster.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// No character matches the given name.
    #[error("no character named \"{0}\"")]
    UnknownCharacter(String),

    /// A character with the same name already exists.
    #[error("character already exists: \"{0}\"")]
    DuplicateName(String),

    /// A character with the same ID already exists.
    #[error("duplicate character id: {0}")]
    DuplicateId(CharacterId),

    /// A character name was empty after trimming.
    #[error("character name must not be empty")]
    EmptyName,

    /// The requested item does not exist on the character.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No item on the character matches the given name.
    #[error("no item named \"{0}\"")]
    UnknownItem(String),

    /// The character already carries the maximum number of items of a kind.
    #[error("cannot carry more than {capacity} {kind} items")]
    CapacityExceeded {
        /// The item kind that is full.
        kind: ItemKind,
        /// The capacity for that kind.
        capacity: usize,
    },

    /// A special-gear item was given too many tags.
    #[error("special gear takes at most {max} tags, got {count}")]
    TooManyTags {
        /// Number of tags supplied.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A patch path was empty or addressed through a non-object value.
    #[error("invalid ledger path: \"{0}\"")]
    InvalidPath(String),

    /// Roster JSON could not be read or written.
    #[error("roster json: {0}")]
    Json(#[from] serde_json::Error),
}
