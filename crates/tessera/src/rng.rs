//! Seeded random source for the randomized tile motifs.
//!
//! Truchet, labyrinth and Wang tiles draw their choices from a fresh
//! [`SeededRng`] created inside each render call, so the same descriptor
//! always produces the same pixels and no state leaks between renders.

use rand::RngCore;

/// Seed every randomized generator starts from.
pub const PATTERN_SEED: u64 = 0;

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with parameters from
/// Numerical Recipes. It implements [`RngCore`], so all of `rand`'s helpers
/// (`random_bool`, `random_range`, `IndexedRandom::choose`) work on it.
///
/// # Example
/// ```
/// use rand::Rng;
/// use tessera::rng::SeededRng;
///
/// let mut rng = SeededRng::new(12345);
/// let flip = rng.random_bool(0.5);
/// # let _ = flip;
/// ```
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG with the given seed.
    ///
    /// The same seed will always produce the same sequence of numbers.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Generator seeded with [`PATTERN_SEED`].
    pub fn for_pattern() -> Self {
        Self::new(PATTERN_SEED)
    }

    #[inline]
    fn step(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::for_pattern()
    }
}

impl RngCore for SeededRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // Low LCG bits have short periods; hand out the high half.
        (self.step() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.next_u32());
        let lo = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
