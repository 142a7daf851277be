// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landing page demo.
//!
//! Mounts the page chrome on `index.html` with console tracing and hands the
//! carousel back to JavaScript as a [`Deck`].
//!
//! Build with: `wasm-pack build --target web demos/landing_page`
//! Then serve `demos/landing_page/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;

use vitrine_backend_web::{ConsoleSink, MountOptions, PageHandle};
use wasm_bindgen::prelude::*;

/// The mounted page's carousel, as seen from JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Deck {
    handle: PageHandle,
}

#[wasm_bindgen]
impl Deck {
    /// Advances to the next slide.
    pub fn next(&self) -> bool {
        self.handle.next()
    }

    /// Goes back one slide.
    pub fn previous(&self) -> bool {
        self.handle.previous()
    }

    /// Shows slide `index`; `false` if out of range.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: usize) -> bool {
        self.handle.go_to(index)
    }

    /// Current slide index, or `undefined` without a carousel.
    #[wasm_bindgen(getter)]
    pub fn current(&self) -> Option<usize> {
        self.handle.current()
    }
}

/// Mounts the page chrome on the current document.
#[wasm_bindgen]
pub fn start() -> Result<Deck, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let options = MountOptions {
        sink: Box::new(ConsoleSink),
        ..MountOptions::default()
    };

    let handle = vitrine_backend_web::mount(&document, options)?;
    Ok(Deck { handle })
}
