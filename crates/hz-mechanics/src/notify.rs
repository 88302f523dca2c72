//! Outcome announcements for whoever is listening (a chat log, a terminal).
//!
//! The engine hands every outcome to a [`Notifier`] as a structured
//! [`Announcement`]. `Display` renders a plain-text record; transports that
//! want richer markup can match on the variants instead.

use serde::Serialize;

use crate::error::Rejection;
use crate::event::LedgerEvent;
use crate::gear_roll::GearRollReport;
use crate::resolution::ResolutionResult;
use crate::retirement::RetirementResult;

/// One outcome record, addressed by character name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Announcement {
    /// An action roll was resolved.
    Roll {
        /// Who rolled.
        character: String,
        /// The full resolution.
        result: ResolutionResult,
    },
    /// A character rolled to retire.
    Retirement {
        /// Who retired.
        character: String,
        /// The roll and verdict.
        result: RetirementResult,
    },
    /// A gear roll was made.
    GearRoll {
        /// Who rolled.
        character: String,
        /// What happened.
        report: GearRollReport,
    },
    /// A ledger changed.
    Ledger {
        /// Whose ledger.
        character: String,
        /// The change.
        event: LedgerEvent,
    },
    /// An operation was rejected and changed nothing.
    Warning {
        /// Who attempted it.
        character: String,
        /// Why it was rejected.
        rejection: Rejection,
    },
}

impl Announcement {
    /// The character this announcement is about.
    pub fn character(&self) -> &str {
        match self {
            Self::Roll { character, .. }
            | Self::Retirement { character, .. }
            | Self::GearRoll { character, .. }
            | Self::Ledger { character, .. }
            | Self::Warning { character, .. } => character,
        }
    }

    /// Returns true for warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning { .. })
    }
}

fn faces(pool: &[u8]) -> String {
    if pool.is_empty() {
        return "(none)".to_string();
    }
    pool.iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_roll(f: &mut std::fmt::Formatter<'_>, result: &ResolutionResult) -> std::fmt::Result {
    writeln!(
        f,
        "  action ({}d6): {}",
        result.action_rolls.len(),
        faces(result.action_rolls.faces())
    )?;
    writeln!(
        f,
        "  danger ({}d6): {}",
        result.danger_rolls.len(),
        faces(result.danger_rolls.faces())
    )?;
    writeln!(f, "  cancelled: {}", faces(result.cancelled.faces()))?;
    writeln!(f, "  remaining: {}", faces(result.remaining_action.faces()))?;
    if result.boons > 0 {
        writeln!(f, "  boon x{}", result.boons)?;
    }
    write!(f, "  {}", result.outcome)?;
    if let Some(high) = result.highest_remaining_action {
        write!(f, " (highest = {high})")?;
    }
    Ok(())
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roll { character, result } => {
                writeln!(f, "{character} rolls")?;
                write_roll(f, result)
            }
            Self::Retirement { character, result } => {
                writeln!(f, "{character} rolls to retire")?;
                write_roll(f, &result.roll)?;
                write!(f, "\n  {character} {}", result.verdict)
            }
            Self::GearRoll { character, report } => {
                write!(f, "{character} gear roll: {report}")
            }
            Self::Ledger { character, event } => write!(f, "{character} {event}"),
            Self::Warning {
                character,
                rejection,
            } => write!(f, "{character}: {rejection}"),
        }
    }
}

/// Fire-and-forget delivery of announcements.
pub trait Notifier {
    /// Deliver one announcement. Delivery failures are the notifier's own
    /// business and never reach the engine.
    fn announce(&mut self, announcement: &Announcement);
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn announce(&mut self, announcement: &Announcement) {
        (**self).announce(announcement);
    }
}

/// A notifier that keeps every announcement in order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<Announcement>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// All announcements so far.
    pub fn entries(&self) -> &[Announcement] {
        &self.entries
    }

    /// Number of announcements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been announced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Only the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Announcement> {
        self.entries.iter().filter(|a| a.is_warning())
    }

    /// Remove and return everything announced so far.
    pub fn drain(&mut self) -> Vec<Announcement> {
        std::mem::take(&mut self.entries)
    }
}

impl Notifier for Journal {
    fn announce(&mut self, announcement: &Announcement) {
        self.entries.push(announcement.clone());
    }
}
