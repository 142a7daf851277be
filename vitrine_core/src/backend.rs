// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Vitrine splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Render surface**: Implements the [`RenderSurface`] trait: flags,
//!   horizontal offsets, image sources, generated dots, opacity and smooth
//!   scrolling on native elements (e.g. DOM nodes).
//!
//! - **Visibility monitor**: Implements the [`VisibilityMonitor`] trait on top
//!   of the platform's intersection primitive (e.g. `IntersectionObserver`).
//!   Notifications travel back as [`VisibilityNotice`] values.
//!
//! - **Input**: Converts native events into [`InputEvent`] values, resolving
//!   the originating element to an [`ElementId`]. This is backend-specific and
//!   not abstracted by a trait because listener setup differs fundamentally
//!   across platforms.
//!
//! # Crate boundaries
//!
//! `vitrine_core` owns the state machines, dispatch, and this contract module.
//! Backend crates depend on `vitrine_core` and provide platform glue.
//! Application code depends on both and wires them together.
//!
//! [`VisibilityNotice`]: crate::visibility::VisibilityNotice
//! [`InputEvent`]: crate::input::InputEvent

use alloc::string::String;

use crate::element::{ElementId, Flag};
use crate::visibility::{FamilyId, MonitorConfig};

/// Applies presentation changes to platform-native elements.
///
/// Both the DOM backend and the in-memory test doubles implement this trait.
/// Every method is cosmetic: an implementation that cannot find the element
/// should do nothing.
pub trait RenderSurface {
    /// Sets (`on == true`) or clears `flag` on `element`.
    fn set_flag(&mut self, element: ElementId, flag: Flag, on: bool);

    /// Positions `element` horizontally at `percent` of its own width.
    fn set_offset_percent(&mut self, element: ElementId, percent: i64);

    /// Returns the current source of an image element.
    fn source(&self, element: ElementId) -> Option<String>;

    /// Replaces the source of an image element.
    fn set_source(&mut self, element: ElementId, source: &str);

    /// Appends a dot for `slide_index` to the dot `row` and returns its id.
    ///
    /// Returns `None` if the dot could not be created.
    fn insert_dot(&mut self, row: ElementId, slide_index: usize) -> Option<ElementId>;

    /// Sets the opacity of `element` (`0.0..=1.0`).
    fn set_opacity(&mut self, element: ElementId, opacity: f32);

    /// Scrolls `element` into view using the platform's smooth scrolling.
    fn scroll_into_view(&mut self, element: ElementId);
}

/// Platform visibility monitoring.
///
/// A backend keeps one native observer per family. Intersection changes are
/// delivered asynchronously, outside of these calls.
pub trait VisibilityMonitor {
    /// Starts watching `target` under the observer for `family`, creating
    /// the observer from `config` on first use.
    fn observe(&mut self, family: FamilyId, config: &MonitorConfig, target: ElementId);

    /// Stops watching `target` under `family`. Unknown targets are ignored.
    fn unobserve(&mut self, family: FamilyId, target: ElementId);
}
