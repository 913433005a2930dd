//! The pole-biased, multi-octave scalar potential ("fbm").
use glam::DVec2;

use crate::field::pole::Pole;
use crate::noise::SimplexNoise;

/// Number of simplex octaves summed on top of the pole contributions.
pub const OCTAVES: usize = 3;

/// Domain shift applied to x between octaves.
pub const OCTAVE_SHIFT: f64 = 31.0;

/// Scalar potential: a vertical gradient, pole contributions and three octaves of simplex noise.
#[derive(Debug, Clone)]
pub struct PoleField {
    noise: SimplexNoise,
    poles: Vec<Pole>,
    cutoff: f64,
    frequency: f64,
    y_gradient: f64,
}

impl PoleField {
    pub fn new(noise: SimplexNoise, cutoff: f64, frequency: f64, y_gradient: f64) -> Self {
        Self {
            noise,
            poles: Vec::new(),
            cutoff,
            frequency,
            y_gradient,
        }
    }

    pub fn push(&mut self, pole: Pole) {
        self.poles.push(pole);
    }

    pub fn poles(&self) -> &[Pole] {
        &self.poles
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn y_gradient(&self) -> f64 {
        self.y_gradient
    }

    /// Sum of all pole contributions at `(x, y)`.
    pub fn pole_sum(&self, x: f64, y: f64) -> f64 {
        let p = DVec2::new(x, y);
        self.poles
            .iter()
            .map(|pole| pole.contribution(p, self.cutoff))
            .sum()
    }

    /// Potential at `(x, y)`.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        let q = DVec2::new(x, y);
        let mut v = self
            .poles
            .iter()
            .fold(self.y_gradient * y, |v, pole| v + pole.contribution(q, self.cutoff));

        let scale = self.frequency / 1000.0;
        let mut p = DVec2::new(x * scale, y * scale);
        let mut f = 1.0;
        for _ in 0..OCTAVES {
            v += self.noise.noise(p * f) / f;
            f *= 2.0;
            p.x += OCTAVE_SHIFT;
        }
        v
    }
}
