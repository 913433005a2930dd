//! Configuration for a single generation run.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum half-extent of the box searched for restart points.
pub const MIN_RESTART_HALF_EXTENT: f64 = 100.0;

/// Parameters of a generation run. Immutable once the generator is built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Canvas size (width, height) in logical units.
    pub canvas_extent: DVec2,
    /// Seed for every pseudorandom stream of the run.
    pub seed: u64,
    /// Minimum distance between traced points.
    pub radius: f64,
    /// Poles farther than this from a query point contribute nothing.
    pub pole_distance_cutoff: f64,
    /// Weight of the global direction in the blend, in `[0, 1]`.
    pub global_flow_strength: f64,
    /// Position scale applied before sampling the global direction noise.
    pub global_flow_scale: f64,
    /// Distance a path may travel before it is forced to restart.
    pub max_path_length: f64,
    /// Candidate draws per restart before the run is declared complete.
    pub max_tries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canvas_extent: DVec2::new(1000.0, 1000.0),
            seed: 3,
            radius: 1.6,
            pole_distance_cutoff: 50.0,
            global_flow_strength: 0.1,
            global_flow_scale: 0.01,
            max_path_length: 70.0,
            max_tries: 1000,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new [`GeneratorConfig`] with the specified canvas extent.
    pub fn new(canvas_extent: DVec2) -> Self {
        Self {
            canvas_extent,
            ..Default::default()
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the minimum point distance.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the pole distance cutoff.
    pub fn with_pole_distance_cutoff(mut self, cutoff: f64) -> Self {
        self.pole_distance_cutoff = cutoff;
        self
    }

    /// Sets the global flow strength and scale.
    pub fn with_global_flow(mut self, strength: f64, scale: f64) -> Self {
        self.global_flow_strength = strength;
        self.global_flow_scale = scale;
        self
    }

    /// Sets the maximum path length.
    pub fn with_max_path_length(mut self, max_path_length: f64) -> Self {
        self.max_path_length = max_path_length;
        self
    }

    /// Sets the restart try budget.
    pub fn with_max_tries(mut self, max_tries: usize) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Half-extent of the box in which restart points are drawn.
    pub fn restart_half_extent(&self) -> DVec2 {
        DVec2::new(
            (self.canvas_extent.x / 5.0).max(MIN_RESTART_HALF_EXTENT),
            (self.canvas_extent.y / 5.0).max(MIN_RESTART_HALF_EXTENT),
        )
    }

    /// Half-extent of the box in which random poles are scattered.
    pub fn pole_half_extent(&self) -> DVec2 {
        self.canvas_extent / 5.0
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if !(self.canvas_extent.is_finite()
            && self.canvas_extent.x > 0.0
            && self.canvas_extent.y > 0.0)
        {
            return Err(Error::InvalidConfig(
                "canvas_extent must be > 0 in both components".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.global_flow_strength) {
            return Err(Error::InvalidConfig(
                "global_flow_strength must be within [0, 1]".into(),
            ));
        }
        if !self.global_flow_scale.is_finite() {
            return Err(Error::InvalidConfig(
                "global_flow_scale must be finite".into(),
            ));
        }
        if self.pole_distance_cutoff.is_nan() || self.pole_distance_cutoff < 0.0 {
            return Err(Error::InvalidConfig(
                "pole_distance_cutoff must be >= 0".into(),
            ));
        }
        if self.max_path_length.is_nan() {
            return Err(Error::InvalidConfig("max_path_length must be a number".into()));
        }
        if self.max_tries == 0 {
            return Err(Error::InvalidConfig("max_tries must be > 0".into()));
        }

        Ok(())
    }
}
