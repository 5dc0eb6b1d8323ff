//! RNG module - random source for tile spawning
//!
//! Spawning needs two uniform draws per tile: the tile value (2 or 4) and the
//! empty cell it lands on. Both go through [`TileRng`] so tests and replays can
//! substitute a scripted or seeded source.
//!
//! Also provides a simple LCG for deterministic play.

use crate::types::SPAWN_VALUES;

/// Uniform random source used by the session.
pub trait TileRng {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current generator state. Feeding it back to [`SimpleRng::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of a power-of-two LCG alternate; use the high half.
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw a spawn value (2 or 4) with equal probability.
pub fn draw_spawn_value<R: TileRng + ?Sized>(rng: &mut R) -> u32 {
    SPAWN_VALUES[rng.next_range(SPAWN_VALUES.len() as u32) as usize]
}
