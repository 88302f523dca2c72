//! Dice sources and pools.
//!
//! Everything in Hazard rolls d6. A [`DiceSource`] hands out faces; the
//! engine never touches an RNG directly, so hosts can plug in animated or
//! remote rollers and tests can script exact faces.

pub mod pool;

pub use pool::DicePool;

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on every die.
pub const D6_SIDES: u8 = 6;

/// Something that rolls independent, uniform d6.
pub trait DiceSource {
    /// Roll `count` dice and return their faces (each in 1-6) in roll order.
    fn roll_d6(&mut self, count: usize) -> Vec<u8>;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_d6(&mut self, count: usize) -> Vec<u8> {
        (**self).roll_d6(count)
    }
}

/// Halve a d6 face into a d3, rounding up (1-2 → 1, 3-4 → 2, 5-6 → 3).
pub fn d3_from_d6(face: u8) -> u8 {
    face.div_ceil(2)
}

/// A pseudo-random roller backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// A roller with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is given, otherwise from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl DiceSource for RandomDice {
    fn roll_d6(&mut self, count: usize) -> Vec<u8> {
        (0..count)
            .map(|_| self.rng.random_range(1..=D6_SIDES))
            .collect()
    }
}

/// Replays a fixed list of faces, then falls back to another source.
///
/// Faces outside 1-6 are clamped into range.
#[derive(Debug, Clone)]
pub struct ScriptedDice<D = RandomDice> {
    faces: VecDeque<u8>,
    fallback: D,
}

impl ScriptedDice<RandomDice> {
    /// Script faces in front of a fixed-seed random roller.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self::with_fallback(faces, RandomDice::seeded(0))
    }
}

impl<D: DiceSource> ScriptedDice<D> {
    /// Script faces in front of an arbitrary fallback source.
    pub fn with_fallback(faces: impl IntoIterator<Item = u8>, fallback: D) -> Self {
        Self {
            faces: faces.into_iter().map(|f| f.clamp(1, D6_SIDES)).collect(),
            fallback,
        }
    }

    /// Faces still waiting to be rolled.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl<D: DiceSource> DiceSource for ScriptedDice<D> {
    fn roll_d6(&mut self, count: usize) -> Vec<u8> {
        let scripted = count.min(self.faces.len());
        let mut rolled: Vec<u8> = self.faces.drain(..scripted).collect();
        if rolled.len() < count {
            rolled.extend(self.fallback.roll_d6(count - rolled.len()));
        }
        rolled
    }
}
