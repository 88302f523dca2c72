//! The drive track: ten tri-state boxes.

use serde::{Deserialize, Serialize};

/// Number of boxes on every drive track.
pub const DRIVE_LEN: usize = 10;

/// One box on the drive track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveBox {
    /// Untouched.
    #[default]
    Empty,
    /// Progress made.
    Ticked,
    /// Lost for good.
    Crossed,
}

impl DriveBox {
    /// The next state in the toggle cycle: Empty → Ticked → Crossed → Empty.
    pub fn next(self) -> Self {
        match self {
            Self::Empty => Self::Ticked,
            Self::Ticked => Self::Crossed,
            Self::Crossed => Self::Empty,
        }
    }

    /// Lowercase key used in persisted data.
    pub fn key(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ticked => "ticked",
            Self::Crossed => "crossed",
        }
    }

    /// Parse a persisted key. Accepts a few legacy spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "empty" | "" | "0" => Some(Self::Empty),
            "ticked" | "tick" | "1" => Some(Self::Ticked),
            "crossed" | "cross" | "x" | "2" => Some(Self::Crossed),
            _ => None,
        }
    }

    /// One-character glyph for compact display.
    pub fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Ticked => '/',
            Self::Crossed => 'X',
        }
    }
}

impl std::fmt::Display for DriveBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A fixed-length sequence of drive boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveTrack {
    boxes: [DriveBox; DRIVE_LEN],
}

impl DriveTrack {
    /// Build a track from up to ten boxes; missing boxes are empty.
    pub fn from_boxes(boxes: impl IntoIterator<Item = DriveBox>) -> Self {
        let mut track = Self::default();
        for (slot, state) in track.boxes.iter_mut().zip(boxes) {
            *slot = state;
        }
        track
    }

    /// All boxes in order.
    pub fn boxes(&self) -> &[DriveBox; DRIVE_LEN] {
        &self.boxes
    }

    /// The box at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<DriveBox> {
        self.boxes.get(index).copied()
    }

    /// Cycle the box at `index`. Returns its new state, or `None` when the
    /// index is off the track.
    pub fn toggle(&mut self, index: usize) -> Option<DriveBox> {
        let slot = self.boxes.get_mut(index)?;
        *slot = slot.next();
        Some(*slot)
    }

    /// Cross out one box: the first empty one, otherwise the last ticked one.
    /// Returns the index crossed, or `None` if every box is already crossed.
    pub fn cross_one(&mut self) -> Option<usize> {
        let index = self
            .boxes
            .iter()
            .position(|b| *b == DriveBox::Empty)
            .or_else(|| self.boxes.iter().rposition(|b| *b == DriveBox::Ticked))?;
        self.boxes[index] = DriveBox::Crossed;
        Some(index)
    }

    /// Number of boxes in the given state.
    pub fn count(&self, state: DriveBox) -> usize {
        self.boxes.iter().filter(|b| **b == state).count()
    }

    /// Number of ticked boxes.
    pub fn ticked(&self) -> usize {
        self.count(DriveBox::Ticked)
    }
}

impl std::fmt::Display for DriveTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyphs: String = self.boxes.iter().map(|b| b.glyph()).collect();
        write!(f, "[{glyphs}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_three_states() {
        let mut track = DriveTrack::default();
        assert_eq!(track.toggle(2), Some(DriveBox::Ticked));
        assert_eq!(track.toggle(2), Some(DriveBox::Crossed));
        assert_eq!(track.toggle(2), Some(DriveBox::Empty));
    }

    #[test]
    fn toggle_off_track() {
        let mut track = DriveTrack::default();
        assert_eq!(track.toggle(DRIVE_LEN), None);
        assert_eq!(track, DriveTrack::default());
    }

    #[test]
    fn from_boxes_pads_and_truncates() {
        let track = DriveTrack::from_boxes([DriveBox::Ticked, DriveBox::Crossed]);
        assert_eq!(track.get(0), Some(DriveBox::Ticked));
        assert_eq!(track.get(9), Some(DriveBox::Empty));

        let long = DriveTrack::from_boxes(std::iter::repeat_n(DriveBox::Ticked, 15));
        assert_eq!(long.ticked(), DRIVE_LEN);
    }

    #[test]
    fn cross_one_prefers_first_empty() {
        let mut track = DriveTrack::from_boxes([DriveBox::Ticked, DriveBox::Empty]);
        assert_eq!(track.cross_one(), Some(1));
        assert_eq!(track.get(1), Some(DriveBox::Crossed));
    }

    #[test]
    fn cross_one_falls_back_to_last_ticked() {
        let mut track = DriveTrack::from_boxes(
            std::iter::repeat_n(DriveBox::Crossed, 7)
                .chain(std::iter::repeat_n(DriveBox::Ticked, 3)),
        );
        assert_eq!(track.cross_one(), Some(9));
        assert_eq!(track.ticked(), 2);
    }

    #[test]
    fn cross_one_when_all_crossed() {
        let mut track = DriveTrack::from_boxes(std::iter::repeat_n(DriveBox::Crossed, 10));
        assert_eq!(track.cross_one(), None);
    }

    #[test]
    fn parse_legacy_keys() {
        assert_eq!(DriveBox::parse("X"), Some(DriveBox::Crossed));
        assert_eq!(DriveBox::parse("ticked"), Some(DriveBox::Ticked));
        assert_eq!(DriveBox::parse("??"), None);
    }

    #[test]
    fn display_glyphs() {
        let track = DriveTrack::from_boxes([DriveBox::Ticked, DriveBox::Crossed]);
        assert_eq!(track.to_string(), "[/X........]");
    }
}
