//! Action/danger dice-pool mechanics for Hazard.
//!
//! Rolls opposed pools of d6, cancels matching faces, and grades the outcome
//! from the highest surviving action die. Around that engine sit the character
//! ledger rules: capped counters for hits, stunt points, stash, experience and
//! gear rolls, the tri-state drive track, conditions, traumas, advancement,
//! retirement, and gear rolls. [`Table`] wires them to a roster, a dice source,
//! and a notifier.

pub mod advancement;
pub mod config;
pub mod dice;
pub mod error;
pub mod event;
pub mod gear_roll;
pub mod notify;
pub mod resolution;
pub mod resources;
pub mod retirement;
pub mod sheet;
pub mod table;

pub use advancement::{Advance, advance, available_advances};
pub use config::TableConfig;
pub use dice::{DicePool, DiceSource, RandomDice, ScriptedDice};
pub use error::{MechError, MechResult, Rejection};
pub use event::LedgerEvent;
pub use gear_roll::{GearRollReport, GearRollRequest, resolve_gear_roll};
pub use notify::{Announcement, Journal, Notifier};
pub use resolution::{OutcomeTier, ResolutionResult, resolve, resolve_rolls};
pub use resources::{LeverageUse, SheetAction};
pub use retirement::{RetirementResult, RetirementVerdict, resolve_retirement};
pub use sheet::{CharacterLedger, Condition, Counter, DriveBox, DriveTrack, Traumas};
pub use table::Table;
