// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser event wiring.
//!
//! Every listener translates a DOM event into a core call on the shared
//! [`App`]. Listeners live for the lifetime of the page, so their closures are
//! leaked with `forget()`.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use vitrine_core::input::{Command, InputEvent, Key};
use vitrine_core::page::Page;
use vitrine_core::trace::{TraceSink, Tracer};
use vitrine_core::visibility::VisibilityNotice;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use crate::monitor::DomMonitor;
use crate::surface::{DomSurface, ElementTable};

/// Everything a listener needs, behind one `RefCell`.
pub(crate) struct App {
    pub(crate) page: Page,
    pub(crate) surface: DomSurface,
    pub(crate) monitor: DomMonitor,
    pub(crate) sink: Box<dyn TraceSink>,
}

impl core::fmt::Debug for App {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("App")
            .field("page", &self.page)
            .field("surface", &self.surface)
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Resolves and runs an input event.
    pub(crate) fn input(&mut self, event: InputEvent) -> Option<Command> {
        let mut tracer = Tracer::new(&mut *self.sink);
        self.page.dispatch(event, &mut self.surface, &mut tracer)
    }

    fn visibility(&mut self, notice: VisibilityNotice) {
        let mut tracer = Tracer::new(&mut *self.sink);
        self.page
            .visibility_changed(notice, &mut self.surface, &mut self.monitor, &mut tracer);
    }

    fn loaded(&mut self, image: &Element) {
        let Some(id) = ElementTable::id_of(image) else {
            return;
        };
        let mut tracer = Tracer::new(&mut *self.sink);
        self.page.asset_loaded(id, &mut self.surface, &mut tracer);
    }
}

/// Attaches `handler` to `target` for `kind` events, for good.
fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Runs `f` on the app unless a listener further up the stack holds it.
fn with_app<R>(app: &Rc<RefCell<App>>, f: impl FnOnce(&mut App) -> R) -> Option<R> {
    let mut app = app.try_borrow_mut().ok()?;
    Some(f(&mut app))
}

/// Routes intersection reports from the monitor into the page.
pub(crate) fn bind_visibility(app: &Rc<RefCell<App>>) {
    let weak = Rc::downgrade(app);
    app.borrow().monitor.set_handler(move |notice| {
        if let Some(app) = weak.upgrade() {
            with_app(&app, |a| a.visibility(notice));
        }
    });
}

/// Document-level click and keydown delegation.
pub(crate) fn bind_document(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let click_app = Rc::clone(app);
    listen(document, "click", move |event: Event| {
        let target = ElementTable::resolve(event.target());
        let command = with_app(&click_app, |a| a.input(InputEvent::Click(target))).flatten();
        // Buttons inside forms and `#section` anchors would otherwise navigate.
        if matches!(command, Some(Command::OpenModal | Command::ScrollTo(_))) {
            event.prevent_default();
        }
    })?;

    let key_app = Rc::clone(app);
    listen(document, "keydown", move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_name(&event.key());
        if key != Key::Other {
            with_app(&key_app, |a| a.input(InputEvent::KeyDown(key)));
        }
    })?;

    Ok(())
}

/// Hover delegation on the navigation bar.
pub(crate) fn bind_nav(nav: &Element, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let over_app = Rc::clone(app);
    listen(nav, "mouseover", move |event: Event| {
        let target = ElementTable::resolve(event.target());
        with_app(&over_app, |a| a.input(InputEvent::PointerOver(target)));
    })?;

    let out_app = Rc::clone(app);
    listen(nav, "mouseout", move |event: Event| {
        let target = ElementTable::resolve(event.target());
        with_app(&out_app, |a| a.input(InputEvent::PointerOut(target)));
    })?;

    Ok(())
}

/// Load completion for each deferred image.
pub(crate) fn bind_image_loads(images: &[Element], app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    for image in images {
        let load_app = Rc::clone(app);
        let el = image.clone();
        listen(image, "load", move |_event: Event| {
            with_app(&load_app, |a| a.loaded(&el));
        })?;
    }
    Ok(())
}
