//! Scalar potential and the flow field derived from it.
//!
//! [`PoleField`] sums a vertical gradient, pole influences and simplex octaves.
//! [`FlowField`] takes its curl, blends in a global direction from
//! [`crate::noise::GradientNoise`] and rescales the result to one step.
pub mod flow;
pub mod pole;
pub mod potential;

pub use flow::FlowField;
pub use pole::{Falloff, Pole};
pub use potential::PoleField;
