//! Gradient noise with lazily generated lattice gradients.
//!
//! Gradients are drawn from one seeded stream the first time a lattice corner
//! is visited and cached for the lifetime of the generator. The value at a
//! point therefore depends on which corners were visited before it: two
//! generators with the same seed agree only when queried in the same order.
//! Lattice coordinates wrap at 256, so the cache never holds more than
//! 65 536 gradients.
use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::noise::hash::{seed_for_stream, Stream};
use crate::sampling::rand01;

const LATTICE_MASK: i64 = 255;

#[derive(Debug)]
pub struct GradientNoise {
    gradients: HashMap<(i32, i32), DVec2>,
    rng: StdRng,
}

impl GradientNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            gradients: HashMap::new(),
            rng: StdRng::seed_from_u64(seed_for_stream(seed, Stream::Gradients)),
        }
    }

    /// Number of lattice gradients generated so far.
    pub fn cached_gradients(&self) -> usize {
        self.gradients.len()
    }

    fn gradient(&mut self, x: i32, y: i32) -> DVec2 {
        let rng = &mut self.rng;
        *self.gradients.entry((x, y)).or_insert_with(|| {
            let angle = rand01(rng) * TAU;
            DVec2::new(angle.cos(), angle.sin())
        })
    }

    /// Noise value at `(x, y)`, within about `[-0.71, 0.71]`.
    pub fn noise(&mut self, x: f64, y: f64) -> f64 {
        let fx = x.floor();
        let fy = y.floor();
        let x0 = (fx as i64 & LATTICE_MASK) as i32;
        let y0 = (fy as i64 & LATTICE_MASK) as i32;
        let x1 = ((x0 as i64 + 1) & LATTICE_MASK) as i32;
        let y1 = ((y0 as i64 + 1) & LATTICE_MASK) as i32;

        let dx = x - fx;
        let dy = y - fy;
        let sx = fade(dx);
        let sy = fade(dy);

        let g00 = self.gradient(x0, y0);
        let g10 = self.gradient(x1, y0);
        let g01 = self.gradient(x0, y1);
        let g11 = self.gradient(x1, y1);

        let n00 = g00.dot(DVec2::new(dx, dy));
        let n10 = g10.dot(DVec2::new(dx - 1.0, dy));
        let n01 = g01.dot(DVec2::new(dx, dy - 1.0));
        let n11 = g11.dot(DVec2::new(dx - 1.0, dy - 1.0));

        let ix0 = lerp(n00, n10, sx);
        let ix1 = lerp(n01, n11, sx);
        lerp(ix0, ix1, sy)
    }
}

/// Quintic ease `t^3 (t (6t - 15) + 10)`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
