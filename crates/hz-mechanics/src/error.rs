//! Error types for the mechanics engine.

use hz_core::{CoreError, ItemKind};
use serde::{Deserialize, Serialize};

use crate::advancement::Advance;

/// A rule precondition that was not met. The operation changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The hit box is already marked.
    #[error("hit box {} is already marked", .index + 1)]
    HitBoxMarked {
        /// Zero-based box index.
        index: usize,
    },

    /// A box index past the end of its track.
    #[error("box {} does not exist (track has {len})", .index + 1)]
    BoxOutOfRange {
        /// Zero-based box index.
        index: usize,
        /// Number of boxes on the track.
        len: usize,
    },

    /// The stunt point at this index is not held.
    #[error("stunt point {} is not held", .index + 1)]
    StuntNotHeld {
        /// Zero-based point index.
        index: usize,
    },

    /// Stunt points are already at maximum.
    #[error("stunt points are already full")]
    StuntsFull,

    /// The stash is already at maximum.
    #[error("stash is already full")]
    StashFull,

    /// There is no leverage in the stash to spend.
    #[error("no leverage to spend")]
    NoLeverage,

    /// Experience is already at maximum.
    #[error("experience is already full")]
    ExperienceFull,

    /// Not enough experience for an advance.
    #[error("advancing needs {needed} experience, have {available}")]
    InsufficientExperience {
        /// Experience required.
        needed: u32,
        /// Experience held.
        available: u32,
    },

    /// This advance can no longer be taken.
    #[error("{advance} is already at its limit")]
    AdvanceMaxed {
        /// The advance that is maxed out.
        advance: Advance,
    },

    /// Not enough gear rolls for the cost.
    #[error("gear roll costs {cost}, only {available} left")]
    InsufficientGearRolls {
        /// Gear rolls required.
        cost: u32,
        /// Gear rolls held.
        available: u32,
    },

    /// Not enough stash for the requested bonus.
    #[error("stash bonus of {requested} exceeds stash of {available}")]
    InsufficientStash {
        /// Stash requested.
        requested: u32,
        /// Stash held.
        available: u32,
    },

    /// A gear roll target outside 1-6.
    #[error("gear roll target must be 1-6, got {target}")]
    TargetOutOfRange {
        /// The requested target.
        target: u32,
    },

    /// The character already carries as many items of this kind as allowed.
    #[error("{kind} is full ({capacity} items)")]
    ItemCapacity {
        /// The full collection.
        kind: ItemKind,
        /// Its capacity.
        capacity: usize,
    },

    /// A trauma line index past the end of the list.
    #[error("trauma line {} does not exist", .line + 1)]
    TraumaOutOfRange {
        /// Zero-based line index.
        line: usize,
    },
}

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A rule precondition failed; nothing was changed.
    #[error("rejected: {0}")]
    Rejected(Rejection),

    /// The roster or item store refused the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<Rejection> for MechError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl MechError {
    /// The rejection, if this error is one.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            Self::Core(_) => None,
        }
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
