//! Path tracing: the walker state, the step-driven generator and its run loop.
//!
//! - [`walker`]: a pen plus the distance traveled since the last restart.
//! - [`generator`]: [`FingerprintGenerator`], one step per call.
//! - [`runner`]: [`run_to_completion`], which loops and reports [`events`].
pub mod events;
pub mod generator;
pub mod runner;
pub mod walker;

pub use generator::{FingerprintGenerator, StepOutcome};
pub use runner::{run_to_completion, RunResult};
pub use walker::Walker;
