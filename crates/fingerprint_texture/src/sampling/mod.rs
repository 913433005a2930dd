//! Spatial sampling: the minimum-distance rejection grid and uniform candidate draws.
//!
//! The walker uses these to keep traced points at least one radius apart and to
//! look for a free spot when a path has to restart.
use rand::Rng;

pub mod rejection_grid;
pub mod uniform_random;

pub use rejection_grid::RejectionGrid;
pub use uniform_random::uniform_in_box;

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}
