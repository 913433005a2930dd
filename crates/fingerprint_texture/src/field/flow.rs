//! Curl flow field blended with a noise-driven global direction.
use std::f64::consts::TAU;

use glam::DVec2;

use crate::field::potential::PoleField;
use crate::noise::GradientNoise;

/// Central-difference step for the curl.
pub const CURL_EPSILON: f64 = 0.01;

/// Fraction of the radius covered by one step.
pub const STEP_FRACTION: f64 = 0.99;

/// Maps positions to step vectors of length `STEP_FRACTION * radius`.
#[derive(Debug)]
pub struct FlowField {
    potential: PoleField,
    bias: GradientNoise,
    global_strength: f64,
    global_scale: f64,
    radius: f64,
}

impl FlowField {
    pub fn new(
        potential: PoleField,
        bias: GradientNoise,
        global_strength: f64,
        global_scale: f64,
        radius: f64,
    ) -> Self {
        Self {
            potential,
            bias,
            global_strength,
            global_scale,
            radius,
        }
    }

    pub fn potential(&self) -> &PoleField {
        &self.potential
    }

    pub fn potential_mut(&mut self) -> &mut PoleField {
        &mut self.potential
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Length of every step returned by [`FlowField::direction`].
    pub fn step_length(&self) -> f64 {
        STEP_FRACTION * self.radius
    }

    /// Curl of the potential at `p`.
    ///
    /// The y difference feeds the x component and the x difference feeds the
    /// y component. Neither is negated.
    pub fn curl(&self, p: DVec2) -> DVec2 {
        let f = &self.potential;
        let e = CURL_EPSILON;
        DVec2::new(
            (f.value(p.x, p.y + e) - f.value(p.x, p.y - e)) / (2.0 * e),
            (f.value(p.x + e, p.y) - f.value(p.x - e, p.y)) / (2.0 * e),
        )
    }

    /// Unit vector at angle `noise * 2pi`, sampled at the scaled position.
    pub fn global_flow(&mut self, p: DVec2) -> DVec2 {
        let angle = self
            .bias
            .noise(p.x * self.global_scale, p.y * self.global_scale)
            * TAU;
        DVec2::new(angle.cos(), angle.sin())
    }

    /// Step vector at `p`.
    ///
    /// A zero or non-finite blend falls back to the positive x axis.
    pub fn direction(&mut self, p: DVec2) -> DVec2 {
        let curl = self.curl(p);
        let global = self.global_flow(p);
        let s = self.global_strength;
        let blended = (1.0 - s) * curl + s * global;

        let scale = blended.length() / self.radius / STEP_FRACTION;
        if scale > 0.0 && scale.is_finite() {
            blended / scale
        } else {
            DVec2::new(self.step_length(), 0.0)
        }
    }
}
