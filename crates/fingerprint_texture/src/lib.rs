#![forbid(unsafe_code)]
//! fingerprint_texture: Flow-traced fingerprint-like line textures.
//!
//! A walker follows the curl of a noisy scalar potential shaped by poles,
//! keeping every traced point at least one radius from all others, and jumps
//! to a random free spot whenever its path gets too long or runs into
//! existing lines.
//!
//! Modules:
//! - noise: simplex noise, lazily cached gradient noise and the seed sequence
//! - field: poles, the scalar potential and the curl flow field
//! - sampling: minimum-distance rejection grid and uniform restart candidates
//! - pen: drawing surface trait and a recording implementation
//! - trace: walker, generator, run loop, events
pub mod config;
pub mod error;
pub mod field;
pub mod noise;
pub mod pen;
pub mod sampling;
pub mod trace;

/// Convenient re-exports for common types. Import with `use fingerprint_texture::prelude::*;`.
pub mod prelude {
    pub use crate::config::GeneratorConfig;
    pub use crate::error::{Error, Result};
    pub use crate::field::{Falloff, FlowField, Pole, PoleField};
    pub use crate::noise::{GradientNoise, SeedSequence, SimplexNoise};
    pub use crate::pen::{Pen, PenCommand, RecordingPen, Transform};
    pub use crate::sampling::RejectionGrid;
    pub use crate::trace::events::{
        EventSink, FnSink, MultiSink, TraceEvent, TraceEventKind, VecSink,
    };
    pub use crate::trace::{
        run_to_completion, FingerprintGenerator, RunResult, StepOutcome, Walker,
    };
}
