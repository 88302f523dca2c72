//! The typed character ledger.
//!
//! A [`CharacterLedger`] is decoded from a character's raw ledger object and
//! written back as a [`LedgerPatch`] of nested key paths. Decoding never
//! fails: missing fields take their defaults, bare numbers count as values,
//! numeric strings are parsed, and out-of-range maxima are clamped.

pub mod condition;
pub mod counter;
pub mod drive;
pub mod trauma;

pub use condition::{Condition, Conditions};
pub use counter::Counter;
pub use drive::{DRIVE_LEN, DriveBox, DriveTrack};
pub use trauma::{TRAUMA_LINES, Traumas};

use std::ops::RangeInclusive;

use hz_core::{Character, LedgerPatch};
use serde_json::{Map, Value};

/// Persisted field names.
pub mod field {
    /// Hit boxes.
    pub const HITS: &str = "hits";
    /// Stunt points.
    pub const STUNT_POINTS: &str = "stunt_points";
    /// Stash (leverage).
    pub const STASH: &str = "stash";
    /// Experience.
    pub const EXPERIENCE: &str = "experience";
    /// Gear-roll budget.
    pub const GEAR_ROLLS: &str = "gear_rolls";
    /// Drive track.
    pub const DRIVE: &str = "drive";
    /// Condition flags.
    pub const CONDITIONS: &str = "conditions";
    /// Trauma lines.
    pub const TRAUMAS: &str = "traumas";
}

/// Allowed range for the hit maximum.
pub const HITS_MAX_RANGE: RangeInclusive<u32> = 3..=4;
/// Allowed range for the stunt-point maximum.
pub const STUNTS_MAX_RANGE: RangeInclusive<u32> = 3..=5;

/// A character's mechanical state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterLedger {
    /// Marked hit boxes; reaching max means a trauma.
    pub hits: Counter,
    /// Held stunt points.
    pub stunt_points: Counter,
    /// Stashed leverage.
    pub stash: Counter,
    /// Unspent experience.
    pub experience: Counter,
    /// Gear rolls left this session.
    pub gear_rolls: Counter,
    /// Long-term drive track.
    pub drive: DriveTrack,
    /// Current conditions.
    pub conditions: Conditions,
    /// Recorded traumas.
    pub traumas: Traumas,
}

impl Default for CharacterLedger {
    fn default() -> Self {
        Self {
            hits: Counter::empty(3),
            stunt_points: Counter::full(3),
            stash: Counter::empty(5),
            experience: Counter::empty(15),
            gear_rolls: Counter::full(4),
            drive: DriveTrack::default(),
            conditions: Conditions::default(),
            traumas: Traumas::default(),
        }
    }
}

impl CharacterLedger {
    /// Decode the ledger stored on a character.
    pub fn from_character(character: &Character) -> Self {
        Self::from_data(&character.ledger)
    }

    /// Decode a raw ledger object, falling back to defaults field by field.
    pub fn from_data(data: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            hits: read_counter(data, field::HITS, defaults.hits, Some(HITS_MAX_RANGE)),
            stunt_points: read_counter(
                data,
                field::STUNT_POINTS,
                defaults.stunt_points,
                Some(STUNTS_MAX_RANGE),
            ),
            stash: read_counter(data, field::STASH, defaults.stash, None),
            experience: read_counter(data, field::EXPERIENCE, defaults.experience, None),
            gear_rolls: read_counter(data, field::GEAR_ROLLS, defaults.gear_rolls, None),
            drive: read_drive(data.get(field::DRIVE)),
            conditions: read_conditions(data.get(field::CONDITIONS)),
            traumas: read_traumas(data.get(field::TRAUMAS)),
        }
    }

    /// Encode the whole ledger as a raw object.
    pub fn to_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        for (name, counter) in self.counters() {
            data.insert(name.to_string(), counter_value(counter));
        }
        data.insert(field::DRIVE.to_string(), drive_value(&self.drive));
        let conditions: Map<String, Value> = Condition::ALL
            .into_iter()
            .map(|c| (c.key().to_string(), Value::Bool(self.conditions.is_set(c))))
            .collect();
        data.insert(field::CONDITIONS.to_string(), Value::Object(conditions));
        data.insert(field::TRAUMAS.to_string(), traumas_value(&self.traumas));
        data
    }

    /// The field-level updates that turn `before` into `self`.
    ///
    /// A changed counter writes both `value` and `max`; the drive track and
    /// trauma lines are written whole; conditions are written per key.
    pub fn changes_since(&self, before: &Self) -> LedgerPatch {
        let mut patch = LedgerPatch::new();
        for ((name, now), (_, then)) in self.counters().into_iter().zip(before.counters()) {
            if now != then {
                patch.set(format!("{name}.value"), now.value);
                patch.set(format!("{name}.max"), now.max);
            }
        }
        if self.drive != before.drive {
            patch.set(field::DRIVE, drive_value(&self.drive));
        }
        for condition in Condition::ALL {
            let now = self.conditions.is_set(condition);
            if now != before.conditions.is_set(condition) {
                patch.set(format!("{}.{}", field::CONDITIONS, condition.key()), now);
            }
        }
        if self.traumas != before.traumas {
            patch.set(field::TRAUMAS, traumas_value(&self.traumas));
        }
        patch
    }

    /// Danger dice added by conditions and filled trauma lines.
    pub fn danger_pool_size(&self) -> usize {
        self.conditions.count() + self.traumas.filled()
    }

    fn counters(&self) -> [(&'static str, Counter); 5] {
        [
            (field::HITS, self.hits),
            (field::STUNT_POINTS, self.stunt_points),
            (field::STASH, self.stash),
            (field::EXPERIENCE, self.experience),
            (field::GEAR_ROLLS, self.gear_rolls),
        ]
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Read a non-negative integer from a number or numeric string.
fn read_u32(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Some(n.clamp(0, i64::from(u32::MAX)) as u32)
}

fn read_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "on" | "yes" | "1"),
        _ => false,
    }
}

fn read_counter(
    data: &Map<String, Value>,
    key: &str,
    default: Counter,
    max_range: Option<RangeInclusive<u32>>,
) -> Counter {
    let (value, max) = match data.get(key) {
        Some(Value::Object(obj)) => (
            obj.get("value").and_then(read_u32),
            obj.get("max").and_then(read_u32),
        ),
        Some(other) => (read_u32(other), None),
        None => (None, None),
    };
    let mut max = max.unwrap_or(default.max);
    if let Some(range) = max_range {
        max = max.clamp(*range.start(), *range.end());
    }
    Counter::new(value.unwrap_or(default.value), max)
}

fn read_drive(value: Option<&Value>) -> DriveTrack {
    let Some(Value::Array(items)) = value else {
        return DriveTrack::default();
    };
    DriveTrack::from_boxes(items.iter().map(|item| match item {
        Value::String(s) => DriveBox::parse(s).unwrap_or_default(),
        Value::Number(n) => match n.as_u64() {
            Some(1) => DriveBox::Ticked,
            Some(2) => DriveBox::Crossed,
            _ => DriveBox::Empty,
        },
        Value::Bool(true) => DriveBox::Ticked,
        _ => DriveBox::Empty,
    }))
}

fn read_conditions(value: Option<&Value>) -> Conditions {
    let mut conditions = Conditions::default();
    if let Some(Value::Object(obj)) = value {
        for condition in Condition::ALL {
            if obj.get(condition.key()).is_some_and(read_bool) {
                conditions.set(condition, true);
            }
        }
    }
    conditions
}

fn read_traumas(value: Option<&Value>) -> Traumas {
    let Some(Value::Array(items)) = value else {
        return Traumas::default();
    };
    Traumas::from_lines(items.iter().map(|item| match item {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }))
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn counter_value(counter: Counter) -> Value {
    serde_json::json!({ "value": counter.value, "max": counter.max })
}

fn drive_value(drive: &DriveTrack) -> Value {
    Value::Array(
        drive
            .boxes()
            .iter()
            .map(|b| Value::String(b.key().to_string()))
            .collect(),
    )
}

fn traumas_value(traumas: &Traumas) -> Value {
    Value::Array(traumas.lines().iter().cloned().map(Value::String).collect())
}
