// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace output.
//!
//! [`JsonLinesSink`] writes every event as one JSON object on its own line.
//! Each object has an `"event"` field naming the event kind; the remaining
//! fields mirror the event struct.

use std::io::Write;

use serde_json::{Value, json};

use vitrine_core::trace::{
    AssetLoadedEvent, CommandEvent, DeregisteredEvent, EffectAppliedEvent, NoticeIgnoredEvent,
    SlideChangedEvent, TraceSink,
};

/// Writes one JSON object per trace event.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Returns the number of lines written so far.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes and returns the destination.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn emit(&mut self, value: &Value) {
        if writeln!(self.writer, "{value}").is_ok() {
            self.written += 1;
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_command(&mut self, e: &CommandEvent) {
        self.emit(&json!({
            "event": "command",
            "command": format!("{:?}", e.command),
        }));
    }

    fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
        self.emit(&json!({
            "event": "slide_changed",
            "from": e.from,
            "to": e.to,
            "len": e.len,
            "cause": format!("{:?}", e.cause),
        }));
    }

    fn on_effect_applied(&mut self, e: &EffectAppliedEvent) {
        self.emit(&json!({
            "event": "effect_applied",
            "family": e.family.0,
            "target": e.target.0,
            "transition": format!("{:?}", e.transition),
        }));
    }

    fn on_deregistered(&mut self, e: &DeregisteredEvent) {
        self.emit(&json!({
            "event": "deregistered",
            "family": e.family.0,
            "target": e.target.0,
        }));
    }

    fn on_notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        self.emit(&json!({
            "event": "notice_ignored",
            "family": e.family.0,
            "target": e.target.0,
            "is_intersecting": e.is_intersecting,
        }));
    }

    fn on_asset_loaded(&mut self, e: &AssetLoadedEvent) {
        self.emit(&json!({
            "event": "asset_loaded",
            "target": e.target.0,
        }));
    }
}
