// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for vitrine.
//!
//! This crate connects [`vitrine_core`] to a live document:
//!
//! - [`DomSurface`]: renders flags as CSS classes and slide offsets as
//!   `translateX()` transforms
//! - [`DomMonitor`]: one `IntersectionObserver` per monitor family
//! - [`ConsoleSink`]: trace events to the browser console
//! - [`mount`]: discovers the markup, installs the page and wires every
//!   listener
//!
//! ```no_run
//! # fn run() -> Result<(), wasm_bindgen::JsValue> {
//! let document = web_sys::window().and_then(|w| w.document()).ok_or("no document")?;
//! let deck = vitrine_backend_web::mount(&document, vitrine_backend_web::MountOptions::default())?;
//! deck.next();
//! # Ok(())
//! # }
//! ```

#![no_std]

extern crate alloc;

mod console;
mod events;
mod layout;
mod monitor;
mod surface;

pub use console::ConsoleSink;
pub use layout::Selectors;
pub use monitor::DomMonitor;
pub use surface::{ClassNames, DomSurface, ElementTable, ID_ATTRIBUTE};
pub use vitrine_core::backend::{RenderSurface, VisibilityMonitor};

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use vitrine_core::page::{Page, PageConfig};
use vitrine_core::trace::{NoopSink, TraceSink, Tracer};
use wasm_bindgen::JsValue;
use web_sys::Document;

use events::App;

/// Everything [`mount`] can be told.
pub struct MountOptions {
    /// Where each part of the page lives.
    pub selectors: Selectors,
    /// Classes rendering each flag.
    pub classes: ClassNames,
    /// Hover opacities and monitor tuning.
    pub config: PageConfig,
    /// Receives trace events (only with the `trace` feature).
    pub sink: Box<dyn TraceSink>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: ClassNames::default(),
            config: PageConfig::default(),
            sink: Box::new(NoopSink),
        }
    }
}

impl core::fmt::Debug for MountOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MountOptions")
            .field("selectors", &self.selectors)
            .field("classes", &self.classes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Installs the page chrome on `document`.
///
/// Parts missing from the markup are skipped. Errors come only from the DOM
/// itself (an invalid selector, a failed `addEventListener`).
pub fn mount(document: &Document, options: MountOptions) -> Result<PageHandle, JsValue> {
    let MountOptions {
        selectors,
        classes,
        config,
        sink,
    } = options;

    let table = ElementTable::new();
    let found = layout::discover(document, &selectors, &table)?;

    let mut surface = DomSurface::new(document.clone(), table.clone(), classes);
    let mut monitor = DomMonitor::new(table);
    let page = Page::install(found.layout, &config, &mut surface, &mut monitor);

    let app = Rc::new(RefCell::new(App {
        page,
        surface,
        monitor,
        sink,
    }));

    events::bind_visibility(&app);
    events::bind_document(document, &app)?;
    if let Some(nav) = &found.nav {
        events::bind_nav(nav, &app)?;
    }
    events::bind_image_loads(&found.lazy_images, &app)?;

    Ok(PageHandle { app })
}

/// Programmatic control over a mounted page's carousel.
///
/// Every method is a no-op (returning `false` or `None`) when the page has no
/// carousel or when called from inside one of the page's own listeners.
#[derive(Clone, Debug)]
pub struct PageHandle {
    app: Rc<RefCell<App>>,
}

impl PageHandle {
    /// Advances to the next slide, wrapping after the last.
    pub fn next(&self) -> bool {
        self.with_deck(|deck, surface, tracer| {
            deck.next(surface, tracer);
            true
        })
        .unwrap_or(false)
    }

    /// Goes back one slide, wrapping before the first.
    pub fn previous(&self) -> bool {
        self.with_deck(|deck, surface, tracer| {
            deck.previous(surface, tracer);
            true
        })
        .unwrap_or(false)
    }

    /// Shows slide `index`. Returns `false` if it is out of range.
    pub fn go_to(&self, index: usize) -> bool {
        self.with_deck(|deck, surface, tracer| deck.go_to(index, surface, tracer))
            .unwrap_or(false)
    }

    /// Returns the current slide index.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        let app = self.app.try_borrow().ok()?;
        app.page.deck().map(|deck| deck.current())
    }

    fn with_deck<R>(
        &self,
        f: impl FnOnce(
            &mut vitrine_core::deck::SlideDeck,
            &mut DomSurface,
            &mut Tracer<'_>,
        ) -> R,
    ) -> Option<R> {
        let mut app = self.app.try_borrow_mut().ok()?;
        let App {
            page, surface, sink, ..
        } = &mut *app;
        let deck = page.deck_mut()?;
        let mut tracer = Tracer::new(&mut **sink);
        Some(f(deck, surface, &mut tracer))
    }
}
