//! RNG module - piece kind selection
//!
//! Kinds are drawn independently and uniformly; there is no bag. The
//! generator is a small LCG so a seed fully determines a session.
//!
//! [`Randomizer`] is the seam: tests plug in [`SequenceRandomizer`] to get a
//! fixed order of pieces.

use crate::types::PieceKind;

/// Source of the next piece kind.
pub trait Randomizer {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`. High bits only; the low bits of an LCG cycle fast.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() >> 16) * max) >> 16
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform draw over all seven kinds.
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Randomizer for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl SequenceRandomizer {
    /// An empty list falls back to O pieces forever.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, cursor: 0 }
    }
}

impl Randomizer for SequenceRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}
