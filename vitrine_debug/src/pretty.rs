// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use vitrine_core::trace::{
    AssetLoadedEvent, CommandEvent, DeregisteredEvent, EffectAppliedEvent, Navigation,
    NoticeIgnoredEvent, SlideChangedEvent, TraceSink, Transition,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn navigation_name(cause: Navigation) -> &'static str {
    match cause {
        Navigation::Next => "next",
        Navigation::Previous => "previous",
        Navigation::GoTo => "go_to",
    }
}

fn transition_name(transition: Transition) -> &'static str {
    match transition {
        Transition::Enter => "enter",
        Transition::Exit => "exit",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_command(&mut self, e: &CommandEvent) {
        let _ = writeln!(self.writer, "[command] {:?}", e.command);
    }

    fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[slide] {} -> {} of {} via {}",
            e.from,
            e.to,
            e.len,
            navigation_name(e.cause),
        );
    }

    fn on_effect_applied(&mut self, e: &EffectAppliedEvent) {
        let _ = writeln!(
            self.writer,
            "[effect] family={} target={} {}",
            e.family.0,
            e.target.0,
            transition_name(e.transition),
        );
    }

    fn on_deregistered(&mut self, e: &DeregisteredEvent) {
        let _ = writeln!(
            self.writer,
            "[unobserve] family={} target={}",
            e.family.0, e.target.0,
        );
    }

    fn on_notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        let _ = writeln!(
            self.writer,
            "[ignored] family={} target={} intersecting={}",
            e.family.0, e.target.0, e.is_intersecting,
        );
    }

    fn on_asset_loaded(&mut self, e: &AssetLoadedEvent) {
        let _ = writeln!(self.writer, "[loaded] target={}", e.target.0);
    }
}
