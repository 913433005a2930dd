//! Noise sources for the scalar potential and the global flow bias.
//!
//! - [`SimplexNoise`]: pure simplex noise over a hash-shuffled permutation table.
//! - [`GradientNoise`]: interpolated gradient noise with a lazily filled gradient cache.
//! - [`hash`]: the shared integer hash and the sequential [`SeedSequence`] draws.
pub mod gradient;
pub mod hash;
pub mod simplex;

pub use gradient::GradientNoise;
pub use hash::SeedSequence;
pub use simplex::SimplexNoise;
