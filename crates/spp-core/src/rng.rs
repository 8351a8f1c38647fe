//! Deterministic uniform random sources.
//!
//! # Determinism strategy
//!
//! A flock draws every random number from a single [`UniformSource`] in a
//! fixed order: two coordinates and one heading per agent at
//! initialization, then one noise term per agent per step in ascending
//! `AgentId` order.  Given the same seed, the whole trajectory is therefore
//! bit-for-bit reproducible.
//!
//! Two sources are provided:
//!
//! - [`MotherRng`] — Marsaglia's "mother of all" multiply-with-carry
//!   generator over five 32-bit words.  The default; tiny state, no
//!   dependencies, and stable output across `rand` releases.
//! - [`SimRng`] — wraps `rand`'s `SmallRng` for callers that prefer the
//!   ecosystem generator.  Reproducible for a fixed `rand` version only.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Replaceable source of uniform variates on `[0, 1)`.
pub trait UniformSource {
    /// Reset to the deterministic state derived from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Next value, uniformly distributed on `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    #[inline]
    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed)
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

// ── MotherRng ─────────────────────────────────────────────────────────────────

/// Multiplier of the linear congruential seeding sequence.
const SEED_MULTIPLIER: u32 = 29_943_829;

/// Number of outputs discarded after seeding to decorrelate the state.
const WARMUP_DRAWS: usize = 19;

/// 2^32 as `f64`; dividing a `u32` by it maps onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Multiply-with-carry generator of order four with a 32-bit carry word.
///
/// `x[0..4]` hold the lagged values, `x[4]` holds the carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotherRng {
    x: [u32; 5],
}

impl MotherRng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { x: [0; 5] };
        rng.reseed(seed);
        rng
    }

    /// Next 32 random bits.
    pub fn next_bits(&mut self) -> u32 {
        let sum: u64 = 2_111_111_111u64 * self.x[3] as u64
            + 1_492u64 * self.x[2] as u64
            + 1_776u64 * self.x[1] as u64
            + 5_115u64 * self.x[0] as u64
            + self.x[4] as u64;
        self.x[3] = self.x[2];
        self.x[2] = self.x[1];
        self.x[1] = self.x[0];
        self.x[4] = (sum >> 32) as u32;
        self.x[0] = sum as u32;
        self.x[0]
    }
}

impl UniformSource for MotherRng {
    /// Only the low 32 bits of `seed` take part in seeding.
    fn reseed(&mut self, seed: u64) {
        let mut s = seed as u32;
        for word in self.x.iter_mut() {
            s = SEED_MULTIPLIER.wrapping_mul(s).wrapping_sub(1);
            *word = s;
        }
        for _ in 0..WARMUP_DRAWS {
            self.next_bits();
        }
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.next_bits() as f64 / TWO_POW_32
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// `SmallRng`-backed uniform source.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl UniformSource for SimRng {
    fn reseed(&mut self, seed: u64) {
        self.0 = SmallRng::seed_from_u64(seed);
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        // `Standard` for f64 samples [0, 1) with 53 bits of precision.
        self.0.r#gen::<f64>()
    }
}
