// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup discovery.
//!
//! [`Selectors`] names every part of the page. [`discover`] queries the
//! document once, adopts what it finds into the [`ElementTable`], and builds
//! the [`PageLayout`] handed to [`Page::install`]. Missing parts are left
//! empty rather than reported.
//!
//! [`Page::install`]: vitrine_core::page::Page::install

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use vitrine_core::page::PageLayout;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::surface::ElementTable;

/// CSS selectors for each part of the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Modal window.
    pub modal: String,
    /// Modal backdrop.
    pub overlay: String,
    /// Buttons opening the modal.
    pub open_modal: String,
    /// Button closing the modal.
    pub close_modal: String,
    /// "Learn more" button.
    pub scroll_button: String,
    /// Section the "learn more" button scrolls to.
    pub scroll_target: String,
    /// Navigation bar.
    pub nav: String,
    /// Navigation links (their `href` names the target section).
    pub nav_links: String,
    /// Logo inside the nav.
    pub logo: String,
    /// Banner observed for the sticky header.
    pub banner: String,
    /// Sections revealed on scroll.
    pub sections: String,
    /// Deferred images; the real source is in `data-src`.
    pub lazy_images: String,
    /// Tab buttons; each carries `data-tab`.
    pub tabs: String,
    /// Prefix of a tab panel's class; `data-tab` is appended.
    pub tab_panel_prefix: String,
    /// Carousel slides.
    pub slides: String,
    /// Slider "previous" button.
    pub previous_button: String,
    /// Slider "next" button.
    pub next_button: String,
    /// Container receiving the generated dots.
    pub dot_row: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            modal: ".modal".into(),
            overlay: ".overlay".into(),
            open_modal: ".btn--show-modal".into(),
            close_modal: ".btn--close-modal".into(),
            scroll_button: ".btn--scroll-to".into(),
            scroll_target: "#section--1".into(),
            nav: ".nav".into(),
            nav_links: ".nav__link".into(),
            logo: ".nav img".into(),
            banner: ".header".into(),
            sections: ".section".into(),
            lazy_images: "img[data-src]".into(),
            tabs: ".operations__tab".into(),
            tab_panel_prefix: ".operations__content--".into(),
            slides: ".slide".into(),
            previous_button: ".slider__btn--left".into(),
            next_button: ".slider__btn--right".into(),
            dot_row: ".dots".into(),
        }
    }
}

/// What [`discover`] found, plus the raw elements the backend binds
/// listeners to.
#[derive(Debug)]
pub(crate) struct Discovered {
    pub(crate) layout: PageLayout,
    pub(crate) nav: Option<Element>,
    pub(crate) lazy_images: Vec<Element>,
}

/// Queries the document for every part named in `selectors`.
pub(crate) fn discover(
    document: &Document,
    selectors: &Selectors,
    table: &ElementTable,
) -> Result<Discovered, JsValue> {
    let q = Query { document, table };

    let nav_el = document.query_selector(&selectors.nav)?;
    let nav_height_px = nav_el
        .as_ref()
        .map_or(0.0, |nav| nav.get_bounding_client_rect().height());

    let nav_links = q
        .all(&selectors.nav_links)?
        .into_iter()
        .map(|link| {
            let section = link
                .get_attribute("href")
                .filter(|href| href.len() > 1 && href.starts_with('#'))
                .and_then(|href| q.one(&href).ok().flatten());
            (table.adopt(&link), section)
        })
        .collect();

    let scroll_buttons = q
        .one(&selectors.scroll_button)?
        .zip(q.one(&selectors.scroll_target)?)
        .into_iter()
        .collect();

    let mut tabs = Vec::new();
    for tab in q.all(&selectors.tabs)? {
        let Some(n) = tab.get_attribute("data-tab") else {
            continue;
        };
        let selector = format!("{}{n}", selectors.tab_panel_prefix);
        // A malformed `data-tab` makes an invalid selector; skip that tab.
        if let Ok(Some(panel)) = q.one(&selector) {
            tabs.push((table.adopt(&tab), panel));
        }
    }

    let lazy_elements = q.all(&selectors.lazy_images)?;
    let lazy_images = lazy_elements
        .iter()
        .filter_map(|img| Some((table.adopt(img), img.get_attribute("data-src")?)))
        .collect();

    let layout = PageLayout {
        slides: q.all_ids(&selectors.slides)?,
        dot_row: q.one(&selectors.dot_row)?,
        previous_button: q.one(&selectors.previous_button)?,
        next_button: q.one(&selectors.next_button)?,
        modal: q.one(&selectors.modal)?,
        overlay: q.one(&selectors.overlay)?,
        open_modal_buttons: q.all_ids(&selectors.open_modal)?,
        close_modal_button: q.one(&selectors.close_modal)?,
        scroll_buttons,
        nav: nav_el.as_ref().map(|nav| table.adopt(nav)),
        nav_height_px,
        nav_links,
        logo: q.one(&selectors.logo)?,
        banner: q.one(&selectors.banner)?,
        sections: q.all_ids(&selectors.sections)?,
        lazy_images,
        tabs,
    };

    Ok(Discovered {
        layout,
        nav: nav_el,
        lazy_images: lazy_elements,
    })
}

struct Query<'a> {
    document: &'a Document,
    table: &'a ElementTable,
}

impl Query<'_> {
    /// First match, adopted.
    fn one(&self, selector: &str) -> Result<Option<vitrine_core::element::ElementId>, JsValue> {
        Ok(self
            .document
            .query_selector(selector)?
            .map(|el| self.table.adopt(&el)))
    }

    /// All matches in document order, not adopted.
    fn all(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        let list = self.document.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i)?.dyn_into::<Element>().ok())
            .collect())
    }

    /// All matches in document order, adopted.
    fn all_ids(&self, selector: &str) -> Result<Vec<vitrine_core::element::ElementId>, JsValue> {
        Ok(self
            .all(selector)?
            .iter()
            .map(|el| self.table.adopt(el))
            .collect())
    }
}
