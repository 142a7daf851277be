// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! [`ElementTable`] adopts DOM elements and hands out [`ElementId`]s for them.
//! [`DomSurface`] implements [`RenderSurface`] on top of the table, rendering
//! flags as CSS classes and offsets as `translateX()` transforms.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::cell::RefCell;

use vitrine_core::backend::RenderSurface;
use vitrine_core::element::{ElementId, Flag};
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, EventTarget, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

/// Attribute carrying the [`ElementId`] of an adopted element.
pub const ID_ATTRIBUTE: &str = "data-vitrine-id";

/// Selector matching any adopted element.
const ADOPTED_SELECTOR: &str = "[data-vitrine-id]";

/// Shared registry of adopted DOM elements.
///
/// Cloning the table is cheap and every clone sees the same elements. Each
/// adopted element is stamped with [`ID_ATTRIBUTE`] so event targets can be
/// mapped back to an id without a lookup table.
#[derive(Clone, Default)]
pub struct ElementTable {
    elements: Rc<RefCell<Vec<Element>>>,
}

impl core::fmt::Debug for ElementTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementTable")
            .field("len", &self.elements.borrow().len())
            .finish_non_exhaustive()
    }
}

impl ElementTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts `el` and returns its id. Adopting an element twice returns the
    /// same id.
    pub fn adopt(&self, el: &Element) -> ElementId {
        if let Some(id) = Self::id_of(el) {
            return id;
        }
        let mut elements = self.elements.borrow_mut();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page adopts far fewer than u32::MAX elements"
        )]
        let id = ElementId(elements.len() as u32);
        let _ = el.set_attribute(ID_ATTRIBUTE, &id.0.to_string());
        elements.push(el.clone());
        id
    }

    /// Returns the element for `id`.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.0 as usize).cloned()
    }

    /// Returns the number of adopted elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Returns `true` if nothing has been adopted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    /// Reads the id stamped on `el`, if it was adopted.
    #[must_use]
    pub fn id_of(el: &Element) -> Option<ElementId> {
        el.get_attribute(ID_ATTRIBUTE)?.parse().ok().map(ElementId)
    }

    /// Resolves an event target to the nearest adopted element, walking up
    /// from the target itself.
    #[must_use]
    pub fn resolve(target: Option<EventTarget>) -> Option<ElementId> {
        let el: Element = target?.dyn_into().ok()?;
        let adopted = el.closest(ADOPTED_SELECTOR).ok()??;
        Self::id_of(&adopted)
    }
}

/// CSS classes used to render each [`Flag`], plus the class of generated dots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// [`Flag::Hidden`].
    pub hidden: String,
    /// [`Flag::Sticky`].
    pub sticky: String,
    /// [`Flag::SectionHidden`].
    pub section_hidden: String,
    /// [`Flag::LowQuality`].
    pub low_quality: String,
    /// [`Flag::DotActive`].
    pub dot_active: String,
    /// [`Flag::TabActive`].
    pub tab_active: String,
    /// [`Flag::ContentActive`].
    pub content_active: String,
    /// Class given to every generated slide dot.
    pub dot: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            hidden: "hidden".into(),
            sticky: "sticky".into(),
            section_hidden: "section--hidden".into(),
            low_quality: "lazy-img".into(),
            dot_active: "dots__dot--active".into(),
            tab_active: "operations__tab--active".into(),
            content_active: "operations__content--active".into(),
            dot: "dots__dot".into(),
        }
    }
}

impl ClassNames {
    /// Returns the class rendering `flag`.
    #[must_use]
    pub fn class(&self, flag: Flag) -> &str {
        match flag {
            Flag::Hidden => &self.hidden,
            Flag::Sticky => &self.sticky,
            Flag::SectionHidden => &self.section_hidden,
            Flag::LowQuality => &self.low_quality,
            Flag::DotActive => &self.dot_active,
            Flag::TabActive => &self.tab_active,
            Flag::ContentActive => &self.content_active,
        }
    }
}

/// Renders page state onto live DOM elements.
pub struct DomSurface {
    document: Document,
    table: ElementTable,
    classes: ClassNames,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("table", &self.table)
            .field("classes", &self.classes)
            .finish_non_exhaustive()
    }
}

impl DomSurface {
    /// Creates a surface over the elements of `table`.
    #[must_use]
    pub fn new(document: Document, table: ElementTable, classes: ClassNames) -> Self {
        Self {
            document,
            table,
            classes,
        }
    }

    /// Returns the element table.
    #[must_use]
    pub fn table(&self) -> &ElementTable {
        &self.table
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.table.get(id)?.dyn_into().ok()
    }
}

impl RenderSurface for DomSurface {
    fn set_flag(&mut self, element: ElementId, flag: Flag, on: bool) {
        if let Some(el) = self.table.get(element) {
            let _ = el
                .class_list()
                .toggle_with_force(self.classes.class(flag), on);
        }
    }

    fn set_offset_percent(&mut self, element: ElementId, percent: i64) {
        if let Some(el) = self.html(element) {
            let _ = el
                .style()
                .set_property("transform", &format!("translateX({percent}%)"));
        }
    }

    fn source(&self, element: ElementId) -> Option<String> {
        self.table.get(element)?.get_attribute("src")
    }

    fn set_source(&mut self, element: ElementId, source: &str) {
        if let Some(el) = self.table.get(element) {
            let _ = el.set_attribute("src", source);
        }
    }

    fn insert_dot(&mut self, row: ElementId, slide_index: usize) -> Option<ElementId> {
        let row = self.table.get(row)?;
        let dot = self.document.create_element("button").ok()?;
        dot.set_class_name(&self.classes.dot);
        dot.set_attribute("data-slide", &slide_index.to_string()).ok()?;
        row.append_child(&dot).ok()?;
        Some(self.table.adopt(&dot))
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        if let Some(el) = self.html(element) {
            let _ = el.style().set_property("opacity", &format!("{opacity}"));
        }
    }

    fn scroll_into_view(&mut self, element: ElementId) {
        if let Some(el) = self.table.get(element) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classes_match_stock_markup() {
        let classes = ClassNames::default();
        assert_eq!(classes.class(Flag::Hidden), "hidden");
        assert_eq!(classes.class(Flag::Sticky), "sticky");
        assert_eq!(classes.class(Flag::SectionHidden), "section--hidden");
        assert_eq!(classes.class(Flag::LowQuality), "lazy-img");
        assert_eq!(classes.class(Flag::DotActive), "dots__dot--active");
        assert_eq!(classes.class(Flag::TabActive), "operations__tab--active");
        assert_eq!(
            classes.class(Flag::ContentActive),
            "operations__content--active"
        );
        assert_eq!(classes.dot, "dots__dot");
    }

    #[test]
    fn custom_class_is_used_for_its_flag_only() {
        let classes = ClassNames {
            sticky: "is-pinned".into(),
            ..ClassNames::default()
        };
        assert_eq!(classes.class(Flag::Sticky), "is-pinned");
        assert_eq!(classes.class(Flag::Hidden), "hidden");
    }
}
