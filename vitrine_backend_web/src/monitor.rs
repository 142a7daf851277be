// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver` visibility monitor.
//!
//! [`DomMonitor`] keeps one [`IntersectionObserver`][mdn] per monitor family,
//! created on first use from the family's [`MonitorConfig`]. Every entry the
//! browser delivers becomes a [`VisibilityNotice`] handed to the callback set
//! with [`set_handler`](DomMonitor::set_handler).
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserver

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use hashbrown::HashMap;
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use vitrine_core::backend::VisibilityMonitor;
use vitrine_core::element::ElementId;
use vitrine_core::visibility::{FamilyId, MonitorConfig, VisibilityNotice};

use crate::surface::ElementTable;

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;
type NoticeHandler = Rc<RefCell<Option<Box<dyn FnMut(VisibilityNotice)>>>>;

struct Observer {
    observer: IntersectionObserver,
    /// Kept alive for as long as the observer may call it.
    _closure: ObserverClosure,
}

/// A [`VisibilityMonitor`] backed by browser `IntersectionObserver`s.
pub struct DomMonitor {
    table: ElementTable,
    observers: HashMap<FamilyId, Observer>,

    /// Receives every notice. Shared with the observer closures so it can be
    /// installed after the observers exist.
    handler: NoticeHandler,
}

impl DomMonitor {
    /// Creates a monitor over the elements of `table`. Notices are dropped
    /// until a handler is installed.
    #[must_use]
    pub fn new(table: ElementTable) -> Self {
        Self {
            table,
            observers: HashMap::new(),
            handler: Rc::new(RefCell::new(None)),
        }
    }

    /// Installs the callback receiving every [`VisibilityNotice`].
    pub fn set_handler(&self, handler: impl FnMut(VisibilityNotice) + 'static) {
        *self.handler.borrow_mut() = Some(Box::new(handler));
    }

    /// Returns the observer for `family`, creating it from `config` if needed.
    fn observer(&mut self, family: FamilyId, config: &MonitorConfig) -> Option<&Observer> {
        if !self.observers.contains_key(&family) {
            let observer = create_observer(family, config, Rc::clone(&self.handler))?;
            self.observers.insert(family, observer);
        }
        self.observers.get(&family)
    }
}

fn create_observer(
    family: FamilyId,
    config: &MonitorConfig,
    handler: NoticeHandler,
) -> Option<Observer> {
    let closure = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            let Some(target) = ElementTable::id_of(&entry.target()) else {
                continue;
            };
            let notice = VisibilityNotice {
                family,
                target,
                is_intersecting: entry.is_intersecting(),
            };
            if let Some(handler) = handler.borrow_mut().as_mut() {
                handler(notice);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&root_margin(config.root_margin_px));
    let observer =
        IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init).ok()?;

    Some(Observer {
        observer,
        _closure: closure,
    })
}

/// Formats a pixel margin as an `IntersectionObserver` `rootMargin` value.
fn root_margin(px: f64) -> String {
    format!("{px}px")
}

impl VisibilityMonitor for DomMonitor {
    fn observe(&mut self, family: FamilyId, config: &MonitorConfig, target: ElementId) {
        let Some(el) = self.table.get(target) else {
            return;
        };
        if let Some(o) = self.observer(family, config) {
            o.observer.observe(&el);
        }
    }

    fn unobserve(&mut self, family: FamilyId, target: ElementId) {
        if let (Some(o), Some(el)) = (self.observers.get(&family), self.table.get(target)) {
            o.observer.unobserve(&el);
        }
    }
}

impl Drop for DomMonitor {
    fn drop(&mut self) {
        for o in self.observers.values() {
            o.observer.disconnect();
        }
    }
}

impl core::fmt::Debug for DomMonitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomMonitor")
            .field("observers", &self.observers.len())
            .field("has_handler", &self.handler.borrow().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_margin_is_whole_pixels_for_presets() {
        assert_eq!(root_margin(-90.0), "-90px");
        assert_eq!(root_margin(200.0), "200px");
        assert_eq!(root_margin(0.0), "0px");
    }

    #[test]
    fn root_margin_matches_monitor_presets() {
        assert_eq!(
            root_margin(MonitorConfig::sticky_header(72.5).root_margin_px),
            "-72.5px"
        );
        assert_eq!(
            root_margin(MonitorConfig::lazy_load().root_margin_px),
            "200px"
        );
    }
}
