//! Uniform random candidate positions inside a centered box.
use glam::DVec2;
use rand::Rng;

use crate::sampling::rand01;

/// Draws a point uniformly from `[-half_extent.x, half_extent.x) x [-half_extent.y, half_extent.y)`.
///
/// The x coordinate is drawn before the y coordinate.
pub fn uniform_in_box(half_extent: DVec2, rng: &mut dyn Rng) -> DVec2 {
    let u = rand01(rng);
    let v = rand01(rng);
    DVec2::new(
        -half_extent.x + u * 2.0 * half_extent.x,
        -half_extent.y + v * 2.0 * half_extent.y,
    )
}
