// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility-triggered effects.
//!
//! A [`VisibilityEffectRegistry`] owns a set of monitor *families*, each with
//! its own [`MonitorConfig`] (threshold and root margin). Rules are registered
//! against a family; the platform's [`VisibilityMonitor`] later reports
//! intersection changes as [`VisibilityNotice`] values, and the registry
//! applies the matching rule's [`Effect`].
//!
//! Two rule modes exist:
//!
//! - [`Mode::Toggle`] rules pair an enter and an exit effect and stay
//!   registered for the lifetime of the page. The effect applied is derived
//!   from the current intersection status, so duplicate notices are harmless.
//! - [`Mode::OneShot`] rules apply their enter effect once and then remove
//!   their target from the monitor. Later notices for that target are ignored.
//!
//! Notices are self-contained: no ordering is assumed across targets or
//! families.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::backend::{RenderSurface, VisibilityMonitor};
use crate::element::{ElementId, Flag};
use crate::trace::{
    AssetLoadedEvent, DeregisteredEvent, EffectAppliedEvent, NoticeIgnoredEvent, Tracer,
    Transition,
};

/// Identifies one monitor family inside a [`VisibilityEffectRegistry`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FamilyId(pub u32);

impl fmt::Debug for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FamilyId({})", self.0)
    }
}

/// Intersection parameters shared by every rule of a family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Fraction of the target that must be visible, in `0.0..=1.0`.
    pub threshold: f64,
    /// Signed padding around the viewport in CSS pixels. Negative values
    /// shrink the trigger zone, positive values grow it.
    pub root_margin_px: f64,
}

impl MonitorConfig {
    /// Creates a config, clamping `threshold` into `0.0..=1.0`.
    #[must_use]
    pub fn new(threshold: f64, root_margin_px: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin_px,
        }
    }

    /// Config for the sticky header: the banner counts as gone once it is
    /// hidden behind a navigation bar of `nav_height_px`.
    #[must_use]
    pub fn sticky_header(nav_height_px: f64) -> Self {
        Self::new(0.0, -nav_height_px.abs())
    }

    /// Config for scroll reveal: 15% of a section must be visible.
    #[must_use]
    pub fn reveal() -> Self {
        Self::new(0.15, 0.0)
    }

    /// Config for lazy images: start loading 200px before the image arrives.
    #[must_use]
    pub fn lazy_load() -> Self {
        Self::new(0.0, 200.0)
    }
}

/// Which element an [`Effect`] writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subject {
    /// The observed element itself.
    Target,
    /// Some other element (e.g. the nav, when the banner is observed).
    Element(ElementId),
}

/// A change applied to the render surface when a rule fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Sets or clears a flag.
    Flag {
        /// Element receiving the flag.
        subject: Subject,
        /// Flag to change.
        flag: Flag,
        /// `true` sets the flag, `false` clears it.
        on: bool,
    },
    /// Swaps the target's placeholder for its real source. Once the real
    /// asset has loaded, [`Flag::LowQuality`] is cleared on the target.
    LoadSource {
        /// The real source.
        source: String,
    },
}

/// How a rule reacts over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Enter and exit effects, for the whole page session.
    Toggle,
    /// Enter effect once, then deregister.
    OneShot,
}

/// An observed element and the effects tied to its visibility.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityRule {
    target: ElementId,
    mode: Mode,
    on_enter: Effect,
    on_exit: Option<Effect>,
}

impl VisibilityRule {
    /// Creates a toggle rule.
    #[must_use]
    pub fn toggle(target: ElementId, on_enter: Effect, on_exit: Effect) -> Self {
        Self {
            target,
            mode: Mode::Toggle,
            on_enter,
            on_exit: Some(on_exit),
        }
    }

    /// Creates a one-shot rule.
    #[must_use]
    pub fn one_shot(target: ElementId, on_enter: Effect) -> Self {
        Self {
            target,
            mode: Mode::OneShot,
            on_enter,
            on_exit: None,
        }
    }

    /// Returns the observed element.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Returns the rule mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// An intersection report from the platform monitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityNotice {
    /// Family whose observer produced the report.
    pub family: FamilyId,
    /// Observed element.
    pub target: ElementId,
    /// Current intersection status (not a delta).
    pub is_intersecting: bool,
}

/// What [`VisibilityEffectRegistry::notify`] did with a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// No rule is registered for the target; nothing happened.
    Ignored,
    /// The rule has nothing to do for this status (a one-shot target that is
    /// not yet intersecting).
    Unchanged,
    /// A toggle rule applied the effect for the current status.
    Applied(Transition),
    /// A one-shot rule fired and its target was deregistered.
    Completed,
}

#[derive(Debug)]
struct Family {
    config: MonitorConfig,
    entries: HashMap<ElementId, Entry>,
}

#[derive(Debug)]
struct Entry {
    rule: VisibilityRule,
    intersecting: Option<bool>,
}

/// Maps visibility notices to rule effects.
#[derive(Debug, Default)]
pub struct VisibilityEffectRegistry {
    families: Vec<Family>,
    awaiting_load: HashSet<ElementId>,
}

impl VisibilityEffectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a monitor family and returns its id.
    pub fn add_family(&mut self, config: MonitorConfig) -> FamilyId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page has a handful of families"
        )]
        let id = FamilyId(self.families.len() as u32);
        self.families.push(Family {
            config,
            entries: HashMap::new(),
        });
        id
    }

    /// Returns the configuration of `family`.
    #[must_use]
    pub fn config(&self, family: FamilyId) -> Option<&MonitorConfig> {
        self.families.get(family.0 as usize).map(|f| &f.config)
    }

    /// Registers `rule` under `family` and starts observing its target.
    ///
    /// Returns `false` (and registers nothing) if the family is unknown or
    /// the target already has a rule in that family.
    pub fn register(
        &mut self,
        family: FamilyId,
        rule: VisibilityRule,
        monitor: &mut dyn VisibilityMonitor,
    ) -> bool {
        let Some(f) = self.families.get_mut(family.0 as usize) else {
            return false;
        };
        let target = rule.target;
        if f.entries.contains_key(&target) {
            return false;
        }
        f.entries.insert(
            target,
            Entry {
                rule,
                intersecting: None,
            },
        );
        monitor.observe(family, &f.config, target);
        true
    }

    /// Returns whether `target` currently has a rule in `family`.
    #[must_use]
    pub fn is_registered(&self, family: FamilyId, target: ElementId) -> bool {
        self.families
            .get(family.0 as usize)
            .is_some_and(|f| f.entries.contains_key(&target))
    }

    /// Returns the number of targets still registered in `family`.
    #[must_use]
    pub fn registered(&self, family: FamilyId) -> usize {
        self.families
            .get(family.0 as usize)
            .map_or(0, |f| f.entries.len())
    }

    /// Returns the last reported intersection status of a registered target.
    #[must_use]
    pub fn intersecting(&self, family: FamilyId, target: ElementId) -> Option<bool> {
        self.families
            .get(family.0 as usize)?
            .entries
            .get(&target)?
            .intersecting
    }

    /// Returns whether `target` swapped its source and is waiting for the
    /// real asset to load.
    #[must_use]
    pub fn is_awaiting_load(&self, target: ElementId) -> bool {
        self.awaiting_load.contains(&target)
    }

    /// Handles one intersection report.
    pub fn notify(
        &mut self,
        notice: VisibilityNotice,
        surface: &mut dyn RenderSurface,
        monitor: &mut dyn VisibilityMonitor,
        tracer: &mut Tracer<'_>,
    ) -> NoticeOutcome {
        let VisibilityNotice {
            family,
            target,
            is_intersecting,
        } = notice;

        let Some(f) = self.families.get_mut(family.0 as usize) else {
            tracer.notice_ignored(&NoticeIgnoredEvent {
                family,
                target,
                is_intersecting,
            });
            return NoticeOutcome::Ignored;
        };
        let Some(entry) = f.entries.get_mut(&target) else {
            tracer.notice_ignored(&NoticeIgnoredEvent {
                family,
                target,
                is_intersecting,
            });
            return NoticeOutcome::Ignored;
        };
        entry.intersecting = Some(is_intersecting);

        let mode = entry.rule.mode;
        match mode {
            Mode::Toggle => {
                let (effect, transition) = if is_intersecting {
                    (Some(&entry.rule.on_enter), Transition::Enter)
                } else {
                    (entry.rule.on_exit.as_ref(), Transition::Exit)
                };
                let Some(effect) = effect else {
                    return NoticeOutcome::Unchanged;
                };
                apply(effect, target, surface, &mut self.awaiting_load);
                tracer.effect_applied(&EffectAppliedEvent {
                    family,
                    target,
                    transition,
                });
                NoticeOutcome::Applied(transition)
            }
            Mode::OneShot => {
                if !is_intersecting {
                    return NoticeOutcome::Unchanged;
                }
                let Some(entry) = f.entries.remove(&target) else {
                    return NoticeOutcome::Ignored;
                };
                apply(&entry.rule.on_enter, target, surface, &mut self.awaiting_load);
                tracer.effect_applied(&EffectAppliedEvent {
                    family,
                    target,
                    transition: Transition::Enter,
                });
                monitor.unobserve(family, target);
                tracer.deregistered(&DeregisteredEvent { family, target });
                NoticeOutcome::Completed
            }
        }
    }

    /// Handles a load completion for an image element.
    ///
    /// Clears [`Flag::LowQuality`] if `target` swapped to its real source.
    /// Returns `false` for loads nobody is waiting for (such as the
    /// placeholder finishing first).
    ///
    /// An image whose real source never loads (a network error) stays
    /// awaiting and keeps [`Flag::LowQuality`]. The pending set holds at most
    /// one entry per lazy image.
    pub fn asset_loaded(
        &mut self,
        target: ElementId,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if !self.awaiting_load.remove(&target) {
            return false;
        }
        surface.set_flag(target, Flag::LowQuality, false);
        tracer.asset_loaded(&AssetLoadedEvent { target });
        true
    }
}

fn apply(
    effect: &Effect,
    target: ElementId,
    surface: &mut dyn RenderSurface,
    awaiting_load: &mut HashSet<ElementId>,
) {
    match effect {
        Effect::Flag { subject, flag, on } => {
            let element = match *subject {
                Subject::Target => target,
                Subject::Element(el) => el,
            };
            surface.set_flag(element, *flag, *on);
        }
        Effect::LoadSource { source } => {
            if surface.source(target).as_deref() == Some(source.as_str()) {
                // Already showing the real asset; no load event will follow.
                surface.set_flag(target, Flag::LowQuality, false);
            } else {
                surface.set_source(target, source);
                awaiting_load.insert(target);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
