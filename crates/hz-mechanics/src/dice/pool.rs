//! Ordered d6 pools.

use serde::{Deserialize, Serialize};

use super::DiceSource;

/// An ordered sequence of d6 faces. Roll order is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DicePool {
    faces: Vec<u8>,
}

impl DicePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    /// Roll `count` dice from the given source.
    pub fn roll<D: DiceSource + ?Sized>(dice: &mut D, count: usize) -> Self {
        Self {
            faces: dice.roll_d6(count),
        }
    }

    /// The faces in roll order.
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    /// Append a face.
    pub fn push(&mut self, face: u8) {
        self.faces.push(face);
    }

    /// Remove the first die showing `face`. Returns false if none does.
    pub fn remove_first(&mut self, face: u8) -> bool {
        match self.faces.iter().position(|&f| f == face) {
            Some(index) => {
                self.faces.remove(index);
                true
            }
            None => false,
        }
    }

    /// The highest face, or `None` for an empty pool.
    pub fn highest(&self) -> Option<u8> {
        self.faces.iter().copied().max()
    }

    /// How many dice show `face`.
    pub fn count_of(&self, face: u8) -> usize {
        self.faces.iter().filter(|&&f| f == face).count()
    }

    /// Number of dice in the pool.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The faces sorted ascending, for order-independent comparison.
    pub fn sorted(&self) -> Vec<u8> {
        let mut faces = self.faces.clone();
        faces.sort_unstable();
        faces
    }
}

impl From<Vec<u8>> for DicePool {
    fn from(faces: Vec<u8>) -> Self {
        Self { faces }
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.faces.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}
