// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;
use alloc::string::String;

use vitrine_core::trace::{
    AssetLoadedEvent, CommandEvent, DeregisteredEvent, EffectAppliedEvent, NoticeIgnoredEvent,
    SlideChangedEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// Writes one `console.debug` line per trace event.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn line(&self, text: String) {
        web_sys::console::debug_1(&JsValue::from_str(&text));
    }
}

impl TraceSink for ConsoleSink {
    fn on_command(&mut self, e: &CommandEvent) {
        self.line(format!("[vitrine] command {:?}", e.command));
    }

    fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
        self.line(format!(
            "[vitrine] slide {} -> {} of {} ({:?})",
            e.from, e.to, e.len, e.cause
        ));
    }

    fn on_effect_applied(&mut self, e: &EffectAppliedEvent) {
        self.line(format!(
            "[vitrine] effect {:?} family={} target={}",
            e.transition, e.family.0, e.target.0
        ));
    }

    fn on_deregistered(&mut self, e: &DeregisteredEvent) {
        self.line(format!(
            "[vitrine] unobserve family={} target={}",
            e.family.0, e.target.0
        ));
    }

    fn on_notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        self.line(format!(
            "[vitrine] ignored notice family={} target={} intersecting={}",
            e.family.0, e.target.0, e.is_intersecting
        ));
    }

    fn on_asset_loaded(&mut self, e: &AssetLoadedEvent) {
        self.line(format!("[vitrine] loaded target={}", e.target.0));
    }
}
