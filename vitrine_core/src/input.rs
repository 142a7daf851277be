// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed input events and role-based dispatch.
//!
//! Interactive elements are tagged with a [`Role`] once, at setup, in a
//! [`RoleMap`]. Input then resolves by lookup: a click on an element with no
//! role (whitespace between dots, for instance) resolves to nothing.
//!
//! Hover is tracked apart from roles: an element can open the modal on click
//! and still take part in nav hover dimming.

use hashbrown::{HashMap, HashSet};

use crate::element::ElementId;

/// What an interactive element does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Slider "next" button.
    NextSlide,
    /// Slider "previous" button.
    PreviousSlide,
    /// Dot selecting a slide.
    Dot(usize),
    /// Button opening the modal.
    OpenModal,
    /// Close button or overlay of the modal.
    CloseModal,
    /// Button or link scrolling a section into view.
    ScrollTo(ElementId),
    /// Tab button selecting a panel.
    Tab(usize),
    /// Navigation link; scrolls to its section if it has one.
    NavLink(Option<ElementId>),
}

/// Keys the page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Escape.
    Escape,
    /// Any other key.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// An input event with its origin already resolved to an element.
///
/// `None` as an origin means the event did not come from any adopted element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer click or tap.
    Click(Option<ElementId>),
    /// Key press anywhere on the page.
    KeyDown(Key),
    /// Pointer entered an element.
    PointerOver(Option<ElementId>),
    /// Pointer left an element.
    PointerOut(Option<ElementId>),
}

/// What the page should do in response to an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advance the slide deck.
    NextSlide,
    /// Step the slide deck back.
    PreviousSlide,
    /// Jump to a slide.
    GoToSlide(usize),
    /// Show the modal.
    OpenModal,
    /// Hide the modal.
    CloseModal,
    /// Hide the modal if it is open (Escape).
    DismissModal,
    /// Smooth-scroll to a section.
    ScrollTo(ElementId),
    /// Select a tab.
    ActivateTab(usize),
    /// Dim every nav link except `hovered`.
    DimNav {
        /// The hovered link.
        hovered: ElementId,
    },
    /// Undo [`DimNav`](Self::DimNav).
    RestoreNav {
        /// The link the pointer left.
        hovered: ElementId,
    },
}

/// Maps interactive elements to their roles and hover membership.
#[derive(Clone, Debug, Default)]
pub struct RoleMap {
    roles: HashMap<ElementId, Role>,
    hoverable: HashSet<ElementId>,
}

impl RoleMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags `element` with `role`, replacing any previous role.
    pub fn tag(&mut self, element: ElementId, role: Role) {
        self.roles.insert(element, role);
    }

    /// Makes pointer-over and pointer-out on `element` resolve to nav
    /// dimming, whatever its click role.
    pub fn track_hover(&mut self, element: ElementId) {
        self.hoverable.insert(element);
    }

    /// Returns the role of `element`.
    #[must_use]
    pub fn role(&self, element: ElementId) -> Option<Role> {
        self.roles.get(&element).copied()
    }

    /// Returns the number of tagged elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if nothing is tagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Resolves an input event to a command.
    #[must_use]
    pub fn resolve(&self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Click(origin) => Some(match self.role(origin?)? {
                Role::NextSlide => Command::NextSlide,
                Role::PreviousSlide => Command::PreviousSlide,
                Role::Dot(slide) => Command::GoToSlide(slide),
                Role::OpenModal => Command::OpenModal,
                Role::CloseModal => Command::CloseModal,
                Role::ScrollTo(section) => Command::ScrollTo(section),
                Role::Tab(tab) => Command::ActivateTab(tab),
                Role::NavLink(section) => Command::ScrollTo(section?),
            }),
            InputEvent::KeyDown(key) => match key {
                Key::ArrowLeft => Some(Command::PreviousSlide),
                Key::ArrowRight => Some(Command::NextSlide),
                Key::Escape => Some(Command::DismissModal),
                Key::Other => None,
            },
            InputEvent::PointerOver(origin) => {
                let hovered = self.nav_link(origin?)?;
                Some(Command::DimNav { hovered })
            }
            InputEvent::PointerOut(origin) => {
                let hovered = self.nav_link(origin?)?;
                Some(Command::RestoreNav { hovered })
            }
        }
    }

    fn nav_link(&self, element: ElementId) -> Option<ElementId> {
        self.hoverable.contains(&element).then_some(element)
    }
}
