//! Core types for Hazard: characters, items, and the roster that stores them.
//!
//! This crate knows nothing about dice or rules. A character's ledger is kept
//! as a raw JSON object addressed by nested key paths (`hits.value`,
//! `conditions.afraid`); `hz-mechanics` decodes it into typed counters and
//! writes changes back as a [`LedgerPatch`].

/// Character records and identifiers.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Gear and special-gear items.
pub mod item;
/// Field-level ledger updates addressed by nested key paths.
pub mod patch;
/// The roster that owns every character.
pub mod roster;
/// Persistence collaborator traits.
pub mod store;

/// Re-export character types.
pub use character::{Character, CharacterId};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{Item, ItemId, ItemKind, MAX_SPECIAL_TAGS};
/// Re-export patch types.
pub use patch::{FieldUpdate, LedgerPatch};
/// Re-export the roster.
pub use roster::Roster;
/// Re-export collaborator traits.
pub use store::{ItemStore, LedgerStore};
