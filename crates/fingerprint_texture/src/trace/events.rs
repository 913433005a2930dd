//! Event types and sinks for observing generation runs.
//!
//! This module defines [`TraceEvent`] and a set of sinks to collect or forward
//! events while a run is driven by [`crate::trace::runner::run_to_completion`].
use glam::DVec2;

use crate::config::GeneratorConfig;
use crate::trace::runner::RunResult;

/// Describes events emitted during a run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum TraceEvent {
    /// Emitted before the first step.
    RunStarted {
        /// The generator configuration.
        config: GeneratorConfig,
        /// Number of poles shaping the potential.
        pole_count: usize,
    },

    /// Emitted when a path was abandoned and a new start point was found.
    Restarted {
        /// 1-based index of the step that restarted.
        step: usize,
        /// Where the new path starts.
        position: DVec2,
        /// Candidate draws spent finding it.
        tries: usize,
    },

    /// Emitted once the run stops, either exhausted or capped.
    RunFinished {
        /// Counters for the whole run.
        result: RunResult,
    },

    /// Non-fatal warning generated during a run.
    Warning {
        /// Context string.
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl TraceEvent {
    pub fn kind(&self) -> TraceEventKind {
        match self {
            TraceEvent::RunStarted { .. } => TraceEventKind::RunStarted,
            TraceEvent::Restarted { .. } => TraceEventKind::Restarted,
            TraceEvent::RunFinished { .. } => TraceEventKind::RunFinished,
            TraceEvent::Warning { .. } => TraceEventKind::Warning,
        }
    }
}

/// Discriminant of [`TraceEvent`], used to filter what a sink receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceEventKind {
    RunStarted,
    Restarted,
    RunFinished,
    Warning,
}

/// A generic event sink that accepts [`TraceEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: TraceEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: TraceEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = TraceEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: TraceEvent) {}

    #[inline]
    fn wants(&self, _kind: TraceEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(TraceEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(TraceEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(TraceEvent),
{
    #[inline]
    fn send(&mut self, event: TraceEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally only some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<TraceEvent>,
    only: Option<Vec<TraceEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collects only the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = TraceEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<TraceEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: TraceEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: TraceEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: TraceEvent) {
        let interested: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(event.kind()))
            .collect();
        let Some((&last, rest)) = interested.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: TraceEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
