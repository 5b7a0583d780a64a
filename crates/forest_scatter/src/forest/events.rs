//! Event types and sinks for observing forest generation runs.
//!
//! This module defines [`ForestEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing
//! [`crate::forest::runner::ForestRunner::generate_with_events`].
use glam::{Vec2, Vec3};

use crate::forest::runner::{ItemTypeStats, SkipReason};
use crate::forest::AssetId;

/// Discriminant of a [`ForestEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForestEventKind {
    RunStarted,
    RunFinished,
    ItemTypeStarted,
    ItemTypeSkipped,
    ItemTypeFinished,
    CandidateEvaluated,
    PlacementMade,
    Warning,
}

/// Describes events emitted during forest generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ForestEvent {
    /// Emitted once the shared clustering offset has been drawn.
    RunStarted {
        /// Number of configured item types, retained or not.
        item_type_count: usize,
        /// Run-level clustering offset.
        cluster_offset: Vec2,
    },

    /// Emitted when every item type has been processed.
    RunFinished {
        /// Instances placed across all item types.
        placed: usize,
        /// Sum of the targets of retained item types.
        expected: usize,
    },

    /// Emitted before the sampling loop of a retained item type.
    ItemTypeStarted {
        index: usize,
        asset: AssetId,
        /// Target instance count.
        target: usize,
    },

    /// Emitted for item types without an asset or with a zero count.
    ItemTypeSkipped { index: usize, reason: SkipReason },

    /// Emitted after the sampling loop of a retained item type.
    ItemTypeFinished { stats: ItemTypeStats },

    /// Emitted after each candidate draw.
    CandidateEvaluated {
        item_index: usize,
        /// Surface position of the candidate.
        position: Vec3,
        /// Slope in degrees.
        slope: f32,
        /// Acceptance probability; `None` when the slope cutoff rejected the candidate.
        probability: Option<f32>,
        accepted: bool,
    },

    /// Emitted when an instance was created.
    PlacementMade {
        item_index: usize,
        /// Index of the instance in the run result.
        instance_index: usize,
        position: Vec3,
        scale: f32,
    },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. item type index and asset).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl ForestEvent {
    pub fn kind(&self) -> ForestEventKind {
        match self {
            ForestEvent::RunStarted { .. } => ForestEventKind::RunStarted,
            ForestEvent::RunFinished { .. } => ForestEventKind::RunFinished,
            ForestEvent::ItemTypeStarted { .. } => ForestEventKind::ItemTypeStarted,
            ForestEvent::ItemTypeSkipped { .. } => ForestEventKind::ItemTypeSkipped,
            ForestEvent::ItemTypeFinished { .. } => ForestEventKind::ItemTypeFinished,
            ForestEvent::CandidateEvaluated { .. } => ForestEventKind::CandidateEvaluated,
            ForestEvent::PlacementMade { .. } => ForestEventKind::PlacementMade,
            ForestEvent::Warning { .. } => ForestEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ForestEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ForestEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: ForestEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ForestEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ForestEvent) {}

    #[inline]
    fn wants(&self, _kind: ForestEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ForestEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ForestEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ForestEvent),
{
    #[inline]
    fn send(&mut self, event: ForestEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ForestEvent>,
    only: Option<Vec<ForestEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only the given kinds.
    pub fn only(kinds: &[ForestEventKind]) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.to_vec()),
        }
    }

    pub fn into_inner(self) -> Vec<ForestEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ForestEvent] {
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
    fn send(&mut self, event: ForestEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ForestEventKind) -> bool {
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

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ForestEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: ForestEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Minimal adapter trait for types that can expose an [`EventSink`].
pub trait AsEventSink {
    fn as_event_sink(&mut self) -> &mut dyn EventSink;
}

impl AsEventSink for VecSink {
    fn as_event_sink(&mut self) -> &mut dyn EventSink {
        self
    }
}
