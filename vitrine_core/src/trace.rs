// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page state transitions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! deck, the visibility registry and the page dispatcher call as they change
//! state. All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::element::ElementId;
use crate::input::Command;
use crate::visibility::FamilyId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which deck operation moved the current slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// [`SlideDeck::next`](crate::deck::SlideDeck::next).
    Next,
    /// [`SlideDeck::previous`](crate::deck::SlideDeck::previous).
    Previous,
    /// [`SlideDeck::go_to`](crate::deck::SlideDeck::go_to).
    GoTo,
}

/// Which side of a visibility rule was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The target is intersecting; `on_enter` ran.
    Enter,
    /// The target is not intersecting; `on_exit` ran.
    Exit,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the page dispatcher resolves an input event to a command.
#[derive(Clone, Copy, Debug)]
pub struct CommandEvent {
    /// The resolved command.
    pub command: Command,
}

/// Emitted after the deck renders a new current slide.
#[derive(Clone, Copy, Debug)]
pub struct SlideChangedEvent {
    /// Index that was current before the operation.
    pub from: usize,
    /// Index that is current now.
    pub to: usize,
    /// Total number of slides.
    pub len: usize,
    /// Operation that caused the change.
    pub cause: Navigation,
}

/// Emitted when a visibility rule's effect is applied.
#[derive(Clone, Copy, Debug)]
pub struct EffectAppliedEvent {
    /// Monitor family of the rule.
    pub family: FamilyId,
    /// Observed element.
    pub target: ElementId,
    /// Which side of the rule ran.
    pub transition: Transition,
}

/// Emitted when a one-shot rule removes its target from the monitor.
#[derive(Clone, Copy, Debug)]
pub struct DeregisteredEvent {
    /// Monitor family of the rule.
    pub family: FamilyId,
    /// Element that is no longer observed.
    pub target: ElementId,
}

/// Emitted when a visibility notice matches no registered rule.
#[derive(Clone, Copy, Debug)]
pub struct NoticeIgnoredEvent {
    /// Monitor family named by the notice.
    pub family: FamilyId,
    /// Element named by the notice.
    pub target: ElementId,
    /// Intersection status carried by the notice.
    pub is_intersecting: bool,
}

/// Emitted when a swapped image finishes loading its real source.
#[derive(Clone, Copy, Debug)]
pub struct AssetLoadedEvent {
    /// The image element.
    pub target: ElementId,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the page.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an input event resolves to a command.
    fn on_command(&mut self, e: &CommandEvent) {
        _ = e;
    }

    /// Called after the deck moves to a new current slide.
    fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
        _ = e;
    }

    /// Called after a visibility effect is applied.
    fn on_effect_applied(&mut self, e: &EffectAppliedEvent) {
        _ = e;
    }

    /// Called after a one-shot target is deregistered.
    fn on_deregistered(&mut self, e: &DeregisteredEvent) {
        _ = e;
    }

    /// Called when a visibility notice is dropped.
    fn on_notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        _ = e;
    }

    /// Called when a lazy image finishes loading.
    fn on_asset_loaded(&mut self, e: &AssetLoadedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`CommandEvent`].
    #[inline]
    pub fn command(&mut self, e: &CommandEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_command(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SlideChangedEvent`].
    #[inline]
    pub fn slide_changed(&mut self, e: &SlideChangedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_slide_changed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EffectAppliedEvent`].
    #[inline]
    pub fn effect_applied(&mut self, e: &EffectAppliedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_effect_applied(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeregisteredEvent`].
    #[inline]
    pub fn deregistered(&mut self, e: &DeregisteredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_deregistered(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NoticeIgnoredEvent`].
    #[inline]
    pub fn notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_notice_ignored(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AssetLoadedEvent`].
    #[inline]
    pub fn asset_loaded(&mut self, e: &AssetLoadedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_asset_loaded(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slide_change() -> SlideChangedEvent {
        SlideChangedEvent {
            from: 0,
            to: 4,
            len: 5,
            cause: Navigation::Previous,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_slide_changed(&sample_slide_change());
        sink.on_command(&CommandEvent {
            command: Command::NextSlide,
        });
        sink.on_asset_loaded(&AssetLoadedEvent {
            target: ElementId(3),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.slide_changed(&sample_slide_change());
        tracer.deregistered(&DeregisteredEvent {
            family: FamilyId(1),
            target: ElementId(2),
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            targets: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
                self.targets.push(e.to);
            }
        }

        let mut sink = RecordingSink {
            targets: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.slide_changed(&sample_slide_change());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.targets, &[4], "one slide change recorded");
    }
}
