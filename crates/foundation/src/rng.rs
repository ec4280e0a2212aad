//! Deterministic lane-wide random number generation.
//!
//! One xorshift32 register per lane, advanced in lockstep. The generator
//! always starts from the same fixed seed vector, so a kernel that draws
//! random numbers produces identical results run after run; lanes stay
//! uncorrelated because their seeds differ.
//!
//! Floats in `[0, 1)` come out of the classic mantissa trick: keep the
//! top 23 state bits, OR in the exponent of 1.0, reinterpret, subtract
//! 1.0.

use crate::lane::{LaneBits, LaneF32, LANES};

/// Fixed per-lane seed vector loaded at construction and on reseed.
pub const RNG_SEED: [u32; LANES] = [0x12345678, 0x87654321, 0xCAFEBABE, 0xDEADBEEF];

/// A lane-wide xorshift32 generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneRng {
    state: LaneBits,
}

impl LaneRng {
    /// Create a generator in its fixed initial state.
    #[inline]
    pub fn new() -> Self {
        Self::from_seed(RNG_SEED)
    }

    /// Create a generator from an explicit seed vector.
    ///
    /// xorshift32 has a fixed point at zero, so any zero lane is replaced
    /// with the corresponding lane of [`RNG_SEED`].
    #[inline]
    pub fn from_seed(seed: [u32; LANES]) -> Self {
        let lanes = std::array::from_fn(|i| if seed[i] == 0 { RNG_SEED[i] } else { seed[i] });
        Self {
            state: LaneBits(lanes),
        }
    }

    /// Return the generator to its fixed initial state.
    #[inline]
    pub fn reseed(&mut self) {
        *self = Self::new();
    }

    /// Current per-lane state, for determinism checks.
    #[inline]
    pub fn state(&self) -> [u32; LANES] {
        self.state.0
    }

    /// Advance every lane and draw one float per lane in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> LaneF32 {
        let mut x = self.state;
        x = x ^ x.shl(13);
        x = x ^ x.shr(17);
        x = x ^ x.shl(5);
        self.state = x;

        // Top 23 bits become the mantissa of a float in [1, 2).
        let bits = x.shr(9) | LaneBits::splat(0x3F80_0000);
        bits.as_f32() - LaneF32::splat(1.0)
    }
}

impl Default for LaneRng {
    fn default() -> Self {
        Self::new()
    }
}
