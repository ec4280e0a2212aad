//! Lockstep Foundation
//!
//! Lane-vector primitives for the lockstep VM. Every value the VM touches
//! is a fixed-width vector of [`LANES`] 32-bit elements, and this crate is
//! the only place that knows how those vectors are represented and
//! operated on. Everything above it deals in whole lanes.

pub mod lane;
pub mod rng;

pub use lane::{LaneBits, LaneF32, LaneI32, LaneMask, LANES};
pub use rng::{LaneRng, RNG_SEED};
