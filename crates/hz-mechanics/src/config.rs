//! Startup options for a table.

use crate::dice::{RandomDice, ScriptedDice};

/// How a table's dice are set up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Faces to hand out before falling back to the RNG.
    pub forced_faces: Vec<u8>,
}

impl TableConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Force the next faces rolled. Faces outside 1-6 are clamped.
    pub fn with_forced_faces(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.forced_faces = faces.into_iter().collect();
        self
    }

    /// Build the dice source this config describes.
    pub fn dice(&self) -> ScriptedDice<RandomDice> {
        ScriptedDice::with_fallback(self.forced_faces.iter().copied(), RandomDice::new(self.seed))
    }
}
