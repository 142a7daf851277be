// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted page session that exercises the tracing and diagnostics pipeline.
//!
//! Installs a page over an in-memory surface, replays a fixed sequence of
//! clicks, key presses, hovers and intersection reports, and sends every trace
//! event to both a [`PrettyPrintSink`](vitrine_debug::pretty::PrettyPrintSink)
//! on stdout and a [`JsonLinesSink`](vitrine_debug::json::JsonLinesSink)
//! writing `trace.jsonl`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufWriter;

use vitrine_core::backend::{RenderSurface, VisibilityMonitor};
use vitrine_core::element::{ElementId, Flag};
use vitrine_core::input::{InputEvent, Key};
use vitrine_core::page::{Page, PageConfig, PageLayout};
use vitrine_core::trace::{
    AssetLoadedEvent, CommandEvent, DeregisteredEvent, EffectAppliedEvent, NoticeIgnoredEvent,
    SlideChangedEvent, TraceSink, Tracer,
};
use vitrine_core::visibility::{FamilyId, MonitorConfig, VisibilityNotice};

use vitrine_debug::json::JsonLinesSink;
use vitrine_debug::pretty::PrettyPrintSink;

const SLIDE_COUNT: u32 = 5;
const FIRST_DOT: u32 = 1000;

// -- in-memory backend -------------------------------------------------------

/// Keeps rendered state in maps so it can be printed at the end.
#[derive(Default)]
struct MemorySurface {
    flags: BTreeSet<(u32, &'static str)>,
    offsets: BTreeMap<u32, i64>,
    sources: BTreeMap<u32, String>,
    next_dot: u32,
}

fn flag_name(flag: Flag) -> &'static str {
    match flag {
        Flag::Hidden => "hidden",
        Flag::Sticky => "sticky",
        Flag::SectionHidden => "section-hidden",
        Flag::LowQuality => "low-quality",
        Flag::DotActive => "dot-active",
        Flag::TabActive => "tab-active",
        Flag::ContentActive => "content-active",
    }
}

impl RenderSurface for MemorySurface {
    fn set_flag(&mut self, element: ElementId, flag: Flag, on: bool) {
        let key = (element.0, flag_name(flag));
        if on {
            self.flags.insert(key);
        } else {
            self.flags.remove(&key);
        }
    }

    fn set_offset_percent(&mut self, element: ElementId, percent: i64) {
        self.offsets.insert(element.0, percent);
    }

    fn source(&self, element: ElementId) -> Option<String> {
        self.sources.get(&element.0).cloned()
    }

    fn set_source(&mut self, element: ElementId, source: &str) {
        self.sources.insert(element.0, source.to_owned());
    }

    fn insert_dot(&mut self, _row: ElementId, _slide_index: usize) -> Option<ElementId> {
        let id = FIRST_DOT + self.next_dot;
        self.next_dot += 1;
        Some(ElementId(id))
    }

    fn set_opacity(&mut self, _element: ElementId, _opacity: f32) {}

    fn scroll_into_view(&mut self, element: ElementId) {
        println!("  (scroll to element {})", element.0);
    }
}

/// Records which targets are observed; the script plays the browser's part.
#[derive(Default)]
struct MemoryMonitor {
    observed: BTreeSet<(u32, u32)>,
}

impl VisibilityMonitor for MemoryMonitor {
    fn observe(&mut self, family: FamilyId, _config: &MonitorConfig, target: ElementId) {
        self.observed.insert((family.0, target.0));
    }

    fn unobserve(&mut self, family: FamilyId, target: ElementId) {
        self.observed.remove(&(family.0, target.0));
    }
}

// -- sinks -------------------------------------------------------------------

/// Forwards every event to two sinks.
struct Tee<A, B>(A, B);

impl<A: TraceSink, B: TraceSink> TraceSink for Tee<A, B> {
    fn on_command(&mut self, e: &CommandEvent) {
        self.0.on_command(e);
        self.1.on_command(e);
    }

    fn on_slide_changed(&mut self, e: &SlideChangedEvent) {
        self.0.on_slide_changed(e);
        self.1.on_slide_changed(e);
    }

    fn on_effect_applied(&mut self, e: &EffectAppliedEvent) {
        self.0.on_effect_applied(e);
        self.1.on_effect_applied(e);
    }

    fn on_deregistered(&mut self, e: &DeregisteredEvent) {
        self.0.on_deregistered(e);
        self.1.on_deregistered(e);
    }

    fn on_notice_ignored(&mut self, e: &NoticeIgnoredEvent) {
        self.0.on_notice_ignored(e);
        self.1.on_notice_ignored(e);
    }

    fn on_asset_loaded(&mut self, e: &AssetLoadedEvent) {
        self.0.on_asset_loaded(e);
        self.1.on_asset_loaded(e);
    }
}

// -- page --------------------------------------------------------------------

const DOT_ROW: ElementId = ElementId(10);
const LEFT: ElementId = ElementId(11);
const RIGHT: ElementId = ElementId(12);
const MODAL: ElementId = ElementId(20);
const OVERLAY: ElementId = ElementId(21);
const OPEN_MODAL: ElementId = ElementId(22);
const NAV: ElementId = ElementId(30);
const NAV_LINK: ElementId = ElementId(31);
const HEADER: ElementId = ElementId(33);
const SECTIONS: [ElementId; 2] = [ElementId(40), ElementId(41)];
const IMAGE: ElementId = ElementId(50);

fn layout() -> PageLayout {
    PageLayout {
        slides: (0..SLIDE_COUNT).map(ElementId).collect(),
        dot_row: Some(DOT_ROW),
        previous_button: Some(LEFT),
        next_button: Some(RIGHT),
        modal: Some(MODAL),
        overlay: Some(OVERLAY),
        open_modal_buttons: vec![OPEN_MODAL],
        nav: Some(NAV),
        nav_height_px: 90.0,
        nav_links: vec![(NAV_LINK, Some(SECTIONS[0]))],
        banner: Some(HEADER),
        sections: SECTIONS.to_vec(),
        lazy_images: vec![(IMAGE, "img/grow.jpg".into())],
        ..PageLayout::default()
    }
}

fn main() -> std::io::Result<()> {
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let json = JsonLinesSink::new(BufWriter::new(File::create("trace.jsonl")?));
    let mut sink = Tee(pretty, json);

    let mut surface = MemorySurface::default();
    surface.set_source(IMAGE, "img/grow-lazy.jpg");
    let mut monitor = MemoryMonitor::default();
    let mut page = Page::install(layout(), &PageConfig::default(), &mut surface, &mut monitor);
    let families = page.families();
    println!("installed: {} observed targets", monitor.observed.len());

    let notice = |family, target, is_intersecting| VisibilityNotice {
        family,
        target,
        is_intersecting,
    };

    {
        let mut tracer = Tracer::new(&mut sink);

        // -- carousel ------------------------------------------------------
        page.dispatch(InputEvent::Click(Some(LEFT)), &mut surface, &mut tracer);
        for _ in 0..2 {
            page.dispatch(InputEvent::KeyDown(Key::ArrowRight), &mut surface, &mut tracer);
        }
        page.dispatch(
            InputEvent::Click(Some(ElementId(FIRST_DOT + 3))),
            &mut surface,
            &mut tracer,
        );

        // -- modal ---------------------------------------------------------
        page.dispatch(InputEvent::Click(Some(OPEN_MODAL)), &mut surface, &mut tracer);
        page.dispatch(InputEvent::KeyDown(Key::Escape), &mut surface, &mut tracer);

        // -- nav -----------------------------------------------------------
        page.dispatch(InputEvent::PointerOver(Some(NAV_LINK)), &mut surface, &mut tracer);
        page.dispatch(InputEvent::PointerOut(Some(NAV_LINK)), &mut surface, &mut tracer);
        page.dispatch(InputEvent::Click(Some(NAV_LINK)), &mut surface, &mut tracer);

        // -- scrolling down ------------------------------------------------
        let reports = [
            notice(families.sticky, HEADER, true),
            notice(families.sticky, HEADER, false),
            notice(families.reveal, SECTIONS[0], false),
            notice(families.reveal, SECTIONS[0], true),
            notice(families.lazy_load, IMAGE, true),
            // Late report from a target that was already deregistered.
            notice(families.reveal, SECTIONS[0], true),
            notice(families.sticky, HEADER, true),
        ];
        for report in reports {
            page.visibility_changed(report, &mut surface, &mut monitor, &mut tracer);
        }
        page.asset_loaded(IMAGE, &mut surface, &mut tracer);
    }

    // -- final state -----------------------------------------------------------
    println!();
    println!(
        "current slide: {:?}",
        page.deck().map(vitrine_core::deck::SlideDeck::current)
    );
    println!("offsets: {:?}", surface.offsets);
    println!("flags: {:?}", surface.flags);
    println!("sources: {:?}", surface.sources);
    println!("still observed: {:?}", monitor.observed);

    let Tee(_, json) = sink;
    let written = json.written();
    json.finish()?;
    println!("wrote {written} events to trace.jsonl");
    Ok(())
}
