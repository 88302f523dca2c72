//! Trauma lines.

/// Number of trauma lines on a sheet.
pub const TRAUMA_LINES: usize = 4;

/// Four free-text injury records. A line is filled when it has any
/// non-whitespace text, and each filled line adds a danger die.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traumas {
    lines: [String; TRAUMA_LINES],
}

impl Traumas {
    /// Build from up to four lines; missing lines are blank.
    pub fn from_lines(lines: impl IntoIterator<Item = String>) -> Self {
        let mut traumas = Self::default();
        for (slot, text) in traumas.lines.iter_mut().zip(lines) {
            *slot = text;
        }
        traumas
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String; TRAUMA_LINES] {
        &self.lines
    }

    /// Replace a line. Returns false if `line` is out of range.
    pub fn set(&mut self, line: usize, text: impl Into<String>) -> bool {
        match self.lines.get_mut(line) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Returns true if the line exists and has text.
    pub fn is_filled(&self, line: usize) -> bool {
        self.lines.get(line).is_some_and(|t| !t.trim().is_empty())
    }

    /// Number of filled lines.
    pub fn filled(&self) -> usize {
        self.lines.iter().filter(|t| !t.trim().is_empty()).count()
    }
}
