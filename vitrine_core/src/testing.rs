// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory test doubles for the backend contract.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::backend::{RenderSurface, VisibilityMonitor};
use crate::element::{ElementId, Flag};
use crate::visibility::{FamilyId, MonitorConfig};

/// First id handed out for generated dots, well clear of hand-picked ids.
const FIRST_GENERATED_ID: u32 = 1000;

/// Records every surface write.
#[derive(Debug)]
pub(crate) struct FakeSurface {
    flags: HashSet<(ElementId, Flag)>,
    offsets: HashMap<ElementId, i64>,
    sources: HashMap<ElementId, String>,
    opacity: HashMap<ElementId, f32>,
    pub(crate) scrolled: Vec<ElementId>,
    /// `(row, dot, slide_index)` for every generated dot.
    pub(crate) dots: Vec<(ElementId, ElementId, usize)>,
    pub(crate) flag_writes: usize,
    pub(crate) source_writes: usize,
    /// When set, `insert_dot` fails.
    pub(crate) refuse_dots: bool,
    next_id: u32,
}

impl FakeSurface {
    pub(crate) fn new() -> Self {
        Self {
            flags: HashSet::new(),
            offsets: HashMap::new(),
            sources: HashMap::new(),
            opacity: HashMap::new(),
            scrolled: Vec::new(),
            dots: Vec::new(),
            flag_writes: 0,
            source_writes: 0,
            refuse_dots: false,
            next_id: FIRST_GENERATED_ID,
        }
    }

    pub(crate) fn has(&self, element: ElementId, flag: Flag) -> bool {
        self.flags.contains(&(element, flag))
    }

    pub(crate) fn offset(&self, element: ElementId) -> Option<i64> {
        self.offsets.get(&element).copied()
    }

    pub(crate) fn opacity(&self, element: ElementId) -> Option<f32> {
        self.opacity.get(&element).copied()
    }

    /// Elements carrying `flag`, sorted.
    pub(crate) fn flagged(&self, flag: Flag) -> Vec<ElementId> {
        let mut out: Vec<_> = self
            .flags
            .iter()
            .filter(|(_, f)| *f == flag)
            .map(|(el, _)| *el)
            .collect();
        out.sort();
        out
    }
}

impl RenderSurface for FakeSurface {
    fn set_flag(&mut self, element: ElementId, flag: Flag, on: bool) {
        self.flag_writes += 1;
        if on {
            self.flags.insert((element, flag));
        } else {
            self.flags.remove(&(element, flag));
        }
    }

    fn set_offset_percent(&mut self, element: ElementId, percent: i64) {
        self.offsets.insert(element, percent);
    }

    fn source(&self, element: ElementId) -> Option<String> {
        self.sources.get(&element).cloned()
    }

    fn set_source(&mut self, element: ElementId, source: &str) {
        self.source_writes += 1;
        self.sources.insert(element, source.to_string());
    }

    fn insert_dot(&mut self, row: ElementId, slide_index: usize) -> Option<ElementId> {
        if self.refuse_dots {
            return None;
        }
        let dot = ElementId(self.next_id);
        self.next_id += 1;
        self.dots.push((row, dot, slide_index));
        Some(dot)
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        self.opacity.insert(element, opacity);
    }

    fn scroll_into_view(&mut self, element: ElementId) {
        self.scrolled.push(element);
    }
}

/// Tracks observed targets per family.
#[derive(Debug, Default)]
pub(crate) struct FakeMonitor {
    observed: HashSet<(FamilyId, ElementId)>,
    configs: HashMap<FamilyId, MonitorConfig>,
    pub(crate) observe_calls: usize,
    pub(crate) unobserved: Vec<(FamilyId, ElementId)>,
}

impl FakeMonitor {
    pub(crate) fn is_observing(&self, family: FamilyId, target: ElementId) -> bool {
        self.observed.contains(&(family, target))
    }

    pub(crate) fn config_of(&self, family: FamilyId) -> Option<MonitorConfig> {
        self.configs.get(&family).copied()
    }
}

impl VisibilityMonitor for FakeMonitor {
    fn observe(&mut self, family: FamilyId, config: &MonitorConfig, target: ElementId) {
        self.observe_calls += 1;
        self.configs.entry(family).or_insert(*config);
        self.observed.insert((family, target));
    }

    fn unobserve(&mut self, family: FamilyId, target: ElementId) {
        self.observed.remove(&(family, target));
        self.unobserved.push((family, target));
    }
}
