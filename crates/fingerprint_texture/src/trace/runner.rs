//! Convenience loop that drives a generator to completion and reports events.
use tracing::{info, warn};

use crate::pen::Pen;
use crate::trace::events::{EventSink, TraceEvent, TraceEventKind};
use crate::trace::generator::{FingerprintGenerator, StepOutcome};
use crate::trace::walker::Walker;

/// Result of driving a generator with [`run_to_completion`].
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Steps taken by this call, including the final exhausted one.
    pub steps: usize,
    /// Segments drawn by this call.
    pub segments: usize,
    /// Restarts performed by this call.
    pub restarts: usize,
    /// Points held by the generator's rejection grid afterwards.
    pub points: usize,
    /// Whether the generator ran out of free space.
    pub completed: bool,
}

impl RunResult {
    /// Creates a new empty [`RunResult`].
    pub fn new() -> Self {
        Self::default()
    }
}

/// Steps `generator` until it is exhausted or `max_steps` steps were taken.
///
/// A capped run leaves the generator and walker resumable: calling this
/// again continues where the previous call stopped.
pub fn run_to_completion<P: Pen>(
    generator: &mut FingerprintGenerator,
    walker: &mut Walker<P>,
    max_steps: Option<usize>,
    sink: &mut dyn EventSink,
) -> RunResult {
    if sink.wants(TraceEventKind::RunStarted) {
        sink.send(TraceEvent::RunStarted {
            config: generator.config().clone(),
            pole_count: generator.poles().len(),
        });
    }

    let mut result = RunResult::new();
    loop {
        if max_steps.is_some_and(|cap| result.steps >= cap) {
            warn!(
                "Run stopped at the step cap ({} steps) before the texture was complete.",
                result.steps
            );
            if sink.wants(TraceEventKind::Warning) {
                sink.send(TraceEvent::Warning {
                    context: "run".into(),
                    message: format!("step cap of {} reached", result.steps),
                });
            }
            break;
        }

        result.steps += 1;
        match generator.step_outcome(walker) {
            StepOutcome::Traced { .. } => result.segments += 1,
            StepOutcome::Restarted { at, tries } => {
                result.restarts += 1;
                if sink.wants(TraceEventKind::Restarted) {
                    sink.send(TraceEvent::Restarted {
                        step: result.steps,
                        position: at,
                        tries,
                    });
                }
            }
            StepOutcome::Exhausted => {
                result.completed = true;
                break;
            }
        }
    }

    result.points = generator.grid().len();
    info!(
        "Run finished | steps: {}, segments: {}, restarts: {}, points: {}, completed: {}.",
        result.steps, result.segments, result.restarts, result.points, result.completed
    );

    if sink.wants(TraceEventKind::RunFinished) {
        sink.send(TraceEvent::RunFinished {
            result: result.clone(),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::config::GeneratorConfig;
    use crate::field::Falloff;
    use crate::pen::RecordingPen;
    use crate::trace::events::VecSink;

    fn generator() -> FingerprintGenerator {
        let config = GeneratorConfig::new(DVec2::new(150.0, 150.0))
            .with_seed(5)
            .with_radius(5.0)
            .with_max_tries(40);
        let mut generator = FingerprintGenerator::new(config).unwrap();
        generator.add_random_poles(3, 0.0, 50.0, Falloff::Logistic);
        generator
    }

    #[test]
    fn runs_until_exhausted() {
        let mut generator = generator();
        let mut walker = Walker::new(RecordingPen::new());
        let mut sink = VecSink::new();
        let result = run_to_completion(&mut generator, &mut walker, None, &mut sink);

        assert!(result.completed);
        assert!(generator.is_exhausted());
        assert_eq!(result.steps, result.segments + result.restarts + 1);
        assert_eq!(result.points, result.segments + result.restarts);
        assert_eq!(result.restarts, generator.restarts());

        let events = sink.into_inner();
        assert_eq!(events.first().map(TraceEvent::kind), Some(TraceEventKind::RunStarted));
        assert_eq!(events.last().map(TraceEvent::kind), Some(TraceEventKind::RunFinished));
        let restarts = events
            .iter()
            .filter(|e| e.kind() == TraceEventKind::Restarted)
            .count();
        assert_eq!(restarts, result.restarts);
    }

    #[test]
    fn step_cap_stops_early_with_warning() {
        let mut generator = generator();
        let mut walker = Walker::new(RecordingPen::new());
        let mut sink = VecSink::only([TraceEventKind::Warning]);
        let result = run_to_completion(&mut generator, &mut walker, Some(10), &mut sink);

        assert!(!result.completed);
        assert_eq!(result.steps, 10);
        assert_eq!(sink.len(), 1);
        assert!(!generator.is_exhausted());
    }

    #[test]
    fn capped_runs_resume() {
        let mut capped = generator();
        let mut walker_a = Walker::new(RecordingPen::new());
        let first = run_to_completion(&mut capped, &mut walker_a, Some(25), &mut ());
        let rest = run_to_completion(&mut capped, &mut walker_a, None, &mut ());

        let mut whole = generator();
        let mut walker_b = Walker::new(RecordingPen::new());
        let all = run_to_completion(&mut whole, &mut walker_b, None, &mut ());

        assert!(rest.completed);
        assert_eq!(first.steps + rest.steps, all.steps);
        assert_eq!(rest.points, all.points);
        assert_eq!(walker_a.pen().commands(), walker_b.pen().commands());
    }
}
