// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity and presentation flags.
//!
//! [`ElementId`] is a lightweight handle identifying one element of the page.
//! Backends assign these when they adopt an element; core treats them as
//! opaque.

use core::fmt;

/// Identifies a specific element on the render surface.
///
/// Backends assign element IDs when adopting elements from the page markup
/// (or when generating new ones, such as slide dots). Core code passes them
/// through without interpreting the value.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElementId(pub u32);

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// A boolean presentation flag that can be set on an element.
///
/// Each flag stands for one visual state of the page. How a flag is rendered
/// (typically a CSS class) is up to the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Element is not displayed (modal window, overlay).
    Hidden,
    /// Navigation bar is pinned to the top of the viewport.
    Sticky,
    /// Content section is waiting to be revealed.
    SectionHidden,
    /// Image still shows its low-quality placeholder.
    LowQuality,
    /// Slide dot marks the current slide.
    DotActive,
    /// Tab button is the selected one.
    TabActive,
    /// Tab panel is the one on display.
    ContentActive,
}
