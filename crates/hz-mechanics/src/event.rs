//! Ledger events: what changed, for notification and logging.

use hz_core::ItemKind;
use serde::{Deserialize, Serialize};

use crate::advancement::Advance;
use crate::resources::LeverageUse;
use crate::sheet::{Condition, Counter, DriveBox};

/// Something that happened to a character's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A hit box was marked.
    HitTaken {
        /// Hits after the change.
        hits: Counter,
    },
    /// The last hit box was marked: the character suffers a trauma.
    TraumaSuffered {
        /// Hits after the change (now full).
        hits: Counter,
    },
    /// One hit was recovered.
    Rested {
        /// Hits after the change.
        hits: Counter,
    },
    /// A held stunt point was spent.
    StuntUsed {
        /// Stunt points after the change.
        stunt_points: Counter,
    },
    /// Stunt points were refilled.
    StuntsRefreshed {
        /// Stunt points after the change.
        stunt_points: Counter,
    },
    /// One bonus stunt point was gained.
    BonusStunt {
        /// Stunt points after the change.
        stunt_points: Counter,
    },
    /// Leverage was rolled for and stashed.
    LeverageGained {
        /// The d6 rolled.
        d6: u8,
        /// The d6 halved, rounding up.
        d3: u8,
        /// How much actually fit in the stash.
        gained: u32,
        /// Stash after the change.
        stash: Counter,
    },
    /// One bonus leverage was stashed.
    BonusLeverage {
        /// Stash after the change.
        stash: Counter,
    },
    /// One leverage was spent.
    LeverageSpent {
        /// What it was spent on.
        used_for: LeverageUse,
        /// Stash after the change.
        stash: Counter,
    },
    /// Stash was spent as a gear-roll bonus.
    StashSpent {
        /// Amount spent.
        amount: u32,
        /// Stash after the change.
        stash: Counter,
    },
    /// One experience was marked.
    ExperienceMarked {
        /// Experience after the change.
        experience: Counter,
    },
    /// A condition was marked.
    ConditionGained {
        /// The condition.
        condition: Condition,
    },
    /// A condition was cleared.
    ConditionCleared {
        /// The condition.
        condition: Condition,
    },
    /// A drive box was cycled.
    DriveToggled {
        /// Zero-based box index.
        index: usize,
        /// The box's new state.
        state: DriveBox,
    },
    /// A drive box was crossed by someone else's catastrophe.
    DriveCrossed {
        /// Zero-based box index.
        index: usize,
    },
    /// A trauma line was written or cleared.
    TraumaRecorded {
        /// Zero-based line index.
        line: usize,
        /// The line's new text.
        text: String,
    },
    /// Gear rolls were refilled.
    GearRollsReset {
        /// Gear rolls after the change.
        gear_rolls: Counter,
    },
    /// Gear rolls were spent.
    GearRollsSpent {
        /// Gear rolls spent.
        cost: u32,
        /// Gear rolls after the change.
        gear_rolls: Counter,
    },
    /// Experience was spent on an advance.
    Advanced {
        /// The advance taken.
        advance: Advance,
        /// Experience after the change.
        experience: Counter,
    },
    /// An item was added.
    ItemAdded {
        /// The item's kind.
        kind: ItemKind,
        /// The item's name.
        name: String,
    },
    /// An item was removed.
    ItemRemoved {
        /// The item's kind.
        kind: ItemKind,
        /// The item's name.
        name: String,
    },
}

impl std::fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HitTaken { hits } => write!(f, "takes a hit (hits {hits})"),
            Self::TraumaSuffered { hits } => {
                write!(f, "suffers a trauma (hits {hits})")
            }
            Self::Rested { hits } => write!(f, "rests (hits {hits})"),
            Self::StuntUsed { stunt_points } => {
                write!(f, "uses a stunt (stunt points {stunt_points})")
            }
            Self::StuntsRefreshed { stunt_points } => {
                write!(f, "refreshes stunts (stunt points {stunt_points})")
            }
            Self::BonusStunt { stunt_points } => {
                write!(f, "gains a bonus stunt (stunt points {stunt_points})")
            }
            Self::LeverageGained {
                d6,
                d3,
                gained,
                stash,
            } => write!(
                f,
                "gains leverage: d6 {d6} → d3 {d3}, +{gained} (stash {stash})"
            ),
            Self::BonusLeverage { stash } => {
                write!(f, "gains bonus leverage (stash {stash})")
            }
            Self::LeverageSpent { used_for, stash } => {
                write!(f, "spends leverage on {used_for} (stash {stash})")
            }
            Self::StashSpent { amount, stash } => {
                write!(f, "spends {amount} stash (stash {stash})")
            }
            Self::ExperienceMarked { experience } => {
                write!(f, "marks experience (xp {experience})")
            }
            Self::ConditionGained { condition } => write!(f, "is now {condition}"),
            Self::ConditionCleared { condition } => write!(f, "is no longer {condition}"),
            Self::DriveToggled { index, state } => {
                write!(f, "drive box {} is now {state}", index + 1)
            }
            Self::DriveCrossed { index } => {
                write!(f, "loses drive box {} to catastrophe", index + 1)
            }
            Self::TraumaRecorded { line, text } => {
                if text.trim().is_empty() {
                    write!(f, "clears trauma {}", line + 1)
                } else {
                    write!(f, "records trauma {}: {text}", line + 1)
                }
            }
            Self::GearRollsReset { gear_rolls } => {
                write!(f, "resets gear rolls ({gear_rolls})")
            }
            Self::GearRollsSpent { cost, gear_rolls } => {
                write!(f, "spends {cost} gear rolls ({gear_rolls})")
            }
            Self::Advanced { advance, experience } => {
                write!(f, "advances: {advance} (xp {experience})")
            }
            Self::ItemAdded { kind, name } => write!(f, "gains {kind} \"{name}\""),
            Self::ItemRemoved { kind, name } => write!(f, "drops {kind} \"{name}\""),
        }
    }
}

impl LedgerEvent {
    /// Returns true for events that deserve special attention (traumas and
    /// drive losses).
    pub fn is_grave(&self) -> bool {
        matches!(self, Self::TraumaSuffered { .. } | Self::DriveCrossed { .. })
    }
}
