//! Walker state: a pen plus the distance traveled since the last restart.
use glam::DVec2;

use crate::pen::Pen;

/// Couples a [`Pen`] with the distance it has traced since the last restart.
#[derive(Debug, Clone, Default)]
pub struct Walker<P: Pen> {
    pen: P,
    traveled: f64,
}

impl<P: Pen> Walker<P> {
    pub fn new(pen: P) -> Self {
        Self { pen, traveled: 0.0 }
    }

    pub fn pen(&self) -> &P {
        &self.pen
    }

    pub fn pen_mut(&mut self) -> &mut P {
        &mut self.pen
    }

    pub fn into_pen(self) -> P {
        self.pen
    }

    /// Logical pen position.
    pub fn position(&self) -> DVec2 {
        DVec2::from(self.pen.position())
    }

    pub fn traveled(&self) -> f64 {
        self.traveled
    }

    pub fn set_traveled(&mut self, traveled: f64) {
        self.traveled = traveled;
    }

    pub fn reset_traveled(&mut self) {
        self.traveled = 0.0;
    }

    /// Draws a segment to `to` and adds `length` to the traveled distance.
    pub(crate) fn advance(&mut self, to: DVec2, length: f64) {
        self.pen.line_to(to.into());
        self.traveled += length;
    }

    /// Jumps to `to` without drawing.
    pub(crate) fn relocate(&mut self, to: DVec2) {
        self.pen.jump(to.into());
    }
}
