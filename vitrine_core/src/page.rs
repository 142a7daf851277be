// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page assembly and dispatch.
//!
//! [`Page`] owns every stateful part of the page chrome: the [`SlideDeck`],
//! the [`Modal`], the [`Tabs`], the [`NavHover`] dimming, the [`RoleMap`] used
//! to resolve input, and the [`VisibilityEffectRegistry`] with its three
//! families (sticky header, scroll reveal, lazy images).
//!
//! A backend discovers elements in the markup, describes them in a
//! [`PageLayout`], and calls [`Page::install`]. Parts whose elements are
//! missing from the layout are skipped. After that, the backend forwards
//! [`InputEvent`]s to [`Page::dispatch`], [`VisibilityNotice`]s to
//! [`Page::visibility_changed`] and image load completions to
//! [`Page::asset_loaded`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::backend::{RenderSurface, VisibilityMonitor};
use crate::deck::SlideDeck;
use crate::element::{ElementId, Flag};
use crate::input::{Command, InputEvent, Role, RoleMap};
use crate::trace::{CommandEvent, Tracer};
use crate::visibility::{
    Effect, FamilyId, MonitorConfig, NoticeOutcome, Subject, VisibilityEffectRegistry,
    VisibilityNotice, VisibilityRule,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Opacity values for nav hover dimming.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverConfig {
    /// Opacity of the other links and the logo while a link is hovered.
    pub dimmed: f32,
    /// Opacity restored when the pointer leaves.
    pub restored: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            dimmed: 0.5,
            restored: 1.0,
        }
    }
}

/// Tunable behavior of a [`Page`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Nav hover opacities.
    pub hover: HoverConfig,
    /// Monitor config for scroll reveal.
    pub reveal: MonitorConfig,
    /// Monitor config for lazy images.
    pub lazy_load: MonitorConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hover: HoverConfig::default(),
            reveal: MonitorConfig::reveal(),
            lazy_load: MonitorConfig::lazy_load(),
        }
    }
}

/// Elements discovered in the markup. Absent parts are `None` or empty.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    /// Carousel slides in order.
    pub slides: Vec<ElementId>,
    /// Container receiving the generated slide dots.
    pub dot_row: Option<ElementId>,
    /// Slider "previous" button.
    pub previous_button: Option<ElementId>,
    /// Slider "next" button.
    pub next_button: Option<ElementId>,
    /// Modal window.
    pub modal: Option<ElementId>,
    /// Modal backdrop; clicking it closes the modal.
    pub overlay: Option<ElementId>,
    /// Buttons opening the modal.
    pub open_modal_buttons: Vec<ElementId>,
    /// Button closing the modal.
    pub close_modal_button: Option<ElementId>,
    /// `(button, section)` pairs that smooth-scroll on click.
    pub scroll_buttons: Vec<(ElementId, ElementId)>,
    /// Navigation bar.
    pub nav: Option<ElementId>,
    /// Measured height of the navigation bar in CSS pixels.
    pub nav_height_px: f64,
    /// Navigation links with the section each one points at.
    pub nav_links: Vec<(ElementId, Option<ElementId>)>,
    /// Logo dimmed along with the nav links.
    pub logo: Option<ElementId>,
    /// Banner above the nav, observed for the sticky header.
    pub banner: Option<ElementId>,
    /// Content sections revealed on scroll.
    pub sections: Vec<ElementId>,
    /// Deferred images with their real source.
    pub lazy_images: Vec<(ElementId, String)>,
    /// `(tab, panel)` pairs in tab order.
    pub tabs: Vec<(ElementId, ElementId)>,
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// A dismissible modal window with its overlay.
#[derive(Clone, Copy, Debug)]
pub struct Modal {
    window: ElementId,
    overlay: ElementId,
    open: bool,
}

impl Modal {
    /// Creates a closed modal.
    #[must_use]
    pub fn new(window: ElementId, overlay: ElementId) -> Self {
        Self {
            window,
            overlay,
            open: false,
        }
    }

    /// Returns whether the modal is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows the modal and the overlay.
    pub fn open(&mut self, surface: &mut dyn RenderSurface) {
        self.set_open(true, surface);
    }

    /// Hides the modal and the overlay.
    pub fn close(&mut self, surface: &mut dyn RenderSurface) {
        self.set_open(false, surface);
    }

    /// Closes the modal if it is open. Returns whether anything changed.
    pub fn dismiss(&mut self, surface: &mut dyn RenderSurface) -> bool {
        if !self.open {
            return false;
        }
        self.close(surface);
        true
    }

    fn set_open(&mut self, open: bool, surface: &mut dyn RenderSurface) {
        self.open = open;
        surface.set_flag(self.window, Flag::Hidden, !open);
        surface.set_flag(self.overlay, Flag::Hidden, !open);
    }
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Tab buttons, each paired with the panel it shows.
#[derive(Clone, Debug)]
pub struct Tabs {
    pairs: Vec<(ElementId, ElementId)>,
    active: usize,
}

impl Tabs {
    /// Creates a tab set with the first tab active (as authored in the
    /// markup). Returns `None` if there are no tabs.
    #[must_use]
    pub fn new(pairs: Vec<(ElementId, ElementId)>) -> Option<Self> {
        (!pairs.is_empty()).then_some(Self { pairs, active: 0 })
    }

    /// Returns the index of the active tab.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Makes tab `index` and its panel the active ones.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn activate(&mut self, index: usize, surface: &mut dyn RenderSurface) -> bool {
        if index >= self.pairs.len() {
            return false;
        }
        for &(tab, panel) in &self.pairs {
            surface.set_flag(tab, Flag::TabActive, false);
            surface.set_flag(panel, Flag::ContentActive, false);
        }
        let (tab, panel) = self.pairs[index];
        surface.set_flag(tab, Flag::TabActive, true);
        surface.set_flag(panel, Flag::ContentActive, true);
        self.active = index;
        true
    }
}

// ---------------------------------------------------------------------------
// NavHover
// ---------------------------------------------------------------------------

/// Dims the other nav links and the logo while a link is hovered.
#[derive(Clone, Debug)]
pub struct NavHover {
    links: Vec<ElementId>,
    logo: Option<ElementId>,
    config: HoverConfig,
}

impl NavHover {
    /// Creates the hover effect for `links`.
    #[must_use]
    pub fn new(links: Vec<ElementId>, logo: Option<ElementId>, config: HoverConfig) -> Self {
        Self {
            links,
            logo,
            config,
        }
    }

    /// Applies the dimmed opacity around `hovered`.
    pub fn dim(&self, hovered: ElementId, surface: &mut dyn RenderSurface) {
        self.fade(hovered, self.config.dimmed, surface);
    }

    /// Restores full opacity around `hovered`.
    pub fn restore(&self, hovered: ElementId, surface: &mut dyn RenderSurface) {
        self.fade(hovered, self.config.restored, surface);
    }

    fn fade(&self, hovered: ElementId, opacity: f32, surface: &mut dyn RenderSurface) {
        for &link in self.links.iter().filter(|&&l| l != hovered) {
            surface.set_opacity(link, opacity);
        }
        if let Some(logo) = self.logo {
            surface.set_opacity(logo, opacity);
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Monitor families created by [`Page::install`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Families {
    /// Sticky header (toggle).
    pub sticky: FamilyId,
    /// Scroll reveal (one-shot).
    pub reveal: FamilyId,
    /// Lazy images (one-shot).
    pub lazy_load: FamilyId,
}

/// The page chrome: every stateful component and the dispatch between them.
#[derive(Debug)]
pub struct Page {
    deck: Option<SlideDeck>,
    modal: Option<Modal>,
    tabs: Option<Tabs>,
    nav: Option<NavHover>,
    roles: RoleMap,
    registry: VisibilityEffectRegistry,
    families: Families,
}

impl Page {
    /// Builds the page from the discovered `layout`, renders initial state
    /// and registers every visibility rule with `monitor`.
    pub fn install(
        layout: PageLayout,
        config: &PageConfig,
        surface: &mut dyn RenderSurface,
        monitor: &mut dyn VisibilityMonitor,
    ) -> Self {
        let PageLayout {
            slides,
            dot_row,
            previous_button,
            next_button,
            modal,
            overlay,
            open_modal_buttons,
            close_modal_button,
            scroll_buttons,
            nav,
            nav_height_px,
            nav_links,
            logo,
            banner,
            sections,
            lazy_images,
            tabs,
        } = layout;

        let mut roles = RoleMap::new();

        // Carousel.
        let deck = dot_row.and_then(|row| SlideDeck::new(slides, row, surface));
        if let Some(deck) = &deck {
            for dot in deck.dots() {
                roles.tag(dot.element, Role::Dot(dot.slide_index));
            }
            if let Some(button) = previous_button {
                roles.tag(button, Role::PreviousSlide);
            }
            if let Some(button) = next_button {
                roles.tag(button, Role::NextSlide);
            }
        }

        // Modal.
        let modal = modal.zip(overlay).map(|(window, overlay)| {
            for &button in &open_modal_buttons {
                roles.tag(button, Role::OpenModal);
            }
            if let Some(button) = close_modal_button {
                roles.tag(button, Role::CloseModal);
            }
            roles.tag(overlay, Role::CloseModal);
            Modal::new(window, overlay)
        });

        // Smooth scroll.
        for (button, section) in scroll_buttons {
            roles.tag(button, Role::ScrollTo(section));
        }

        // Tabs.
        let tabs = Tabs::new(tabs);
        if let Some(tabs) = &tabs {
            for (i, &(tab, _)) in tabs.pairs.iter().enumerate() {
                roles.tag(tab, Role::Tab(i));
            }
        }

        // Nav hover.
        let nav_hover = (!nav_links.is_empty()).then(|| {
            // A link that also opens the modal keeps that role for clicks.
            for &(link, section) in &nav_links {
                if roles.role(link).is_none() {
                    roles.tag(link, Role::NavLink(section));
                }
                roles.track_hover(link);
            }
            NavHover::new(
                nav_links.iter().map(|&(link, _)| link).collect(),
                logo,
                config.hover,
            )
        });

        // Visibility families.
        let mut registry = VisibilityEffectRegistry::new();
        let families = Families {
            sticky: registry.add_family(MonitorConfig::sticky_header(nav_height_px)),
            reveal: registry.add_family(config.reveal),
            lazy_load: registry.add_family(config.lazy_load),
        };

        if let (Some(banner), Some(nav)) = (banner, nav) {
            let sticky = |on| Effect::Flag {
                subject: Subject::Element(nav),
                flag: Flag::Sticky,
                on,
            };
            registry.register(
                families.sticky,
                VisibilityRule::toggle(banner, sticky(false), sticky(true)),
                monitor,
            );
        }

        for section in sections {
            let rule = VisibilityRule::one_shot(
                section,
                Effect::Flag {
                    subject: Subject::Target,
                    flag: Flag::SectionHidden,
                    on: false,
                },
            );
            if registry.register(families.reveal, rule, monitor) {
                surface.set_flag(section, Flag::SectionHidden, true);
            }
        }

        for (image, source) in lazy_images {
            registry.register(
                families.lazy_load,
                VisibilityRule::one_shot(image, Effect::LoadSource { source }),
                monitor,
            );
        }

        Self {
            deck,
            modal,
            tabs,
            nav: nav_hover,
            roles,
            registry,
            families,
        }
    }

    /// Returns the slide deck, if the page has one.
    #[must_use]
    pub fn deck(&self) -> Option<&SlideDeck> {
        self.deck.as_ref()
    }

    /// Returns the slide deck for programmatic navigation.
    pub fn deck_mut(&mut self) -> Option<&mut SlideDeck> {
        self.deck.as_mut()
    }

    /// Returns the modal, if the page has one.
    #[must_use]
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Returns the tab set, if the page has one.
    #[must_use]
    pub fn tabs(&self) -> Option<&Tabs> {
        self.tabs.as_ref()
    }

    /// Returns the role map built at install time.
    #[must_use]
    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    /// Returns the visibility registry.
    #[must_use]
    pub fn registry(&self) -> &VisibilityEffectRegistry {
        &self.registry
    }

    /// Returns the ids of the three monitor families.
    #[must_use]
    pub fn families(&self) -> Families {
        self.families
    }

    /// Resolves `event` and runs the resulting command.
    ///
    /// Returns the command, or `None` if the event resolved to nothing.
    pub fn dispatch(
        &mut self,
        event: InputEvent,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) -> Option<Command> {
        let command = self.roles.resolve(event)?;
        tracer.command(&CommandEvent { command });
        self.execute(command, surface, tracer);
        Some(command)
    }

    fn execute(
        &mut self,
        command: Command,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) {
        match command {
            Command::NextSlide => {
                if let Some(deck) = &mut self.deck {
                    deck.next(surface, tracer);
                }
            }
            Command::PreviousSlide => {
                if let Some(deck) = &mut self.deck {
                    deck.previous(surface, tracer);
                }
            }
            Command::GoToSlide(index) => {
                if let Some(deck) = &mut self.deck {
                    deck.go_to(index, surface, tracer);
                }
            }
            Command::OpenModal => {
                if let Some(modal) = &mut self.modal {
                    modal.open(surface);
                }
            }
            Command::CloseModal => {
                if let Some(modal) = &mut self.modal {
                    modal.close(surface);
                }
            }
            Command::DismissModal => {
                if let Some(modal) = &mut self.modal {
                    modal.dismiss(surface);
                }
            }
            Command::ScrollTo(section) => surface.scroll_into_view(section),
            Command::ActivateTab(index) => {
                if let Some(tabs) = &mut self.tabs {
                    tabs.activate(index, surface);
                }
            }
            Command::DimNav { hovered } => {
                if let Some(nav) = &self.nav {
                    nav.dim(hovered, surface);
                }
            }
            Command::RestoreNav { hovered } => {
                if let Some(nav) = &self.nav {
                    nav.restore(hovered, surface);
                }
            }
        }
    }

    /// Forwards an intersection report to the registry.
    pub fn visibility_changed(
        &mut self,
        notice: VisibilityNotice,
        surface: &mut dyn RenderSurface,
        monitor: &mut dyn VisibilityMonitor,
        tracer: &mut Tracer<'_>,
    ) -> NoticeOutcome {
        self.registry.notify(notice, surface, monitor, tracer)
    }

    /// Forwards an image load completion to the registry.
    pub fn asset_loaded(
        &mut self,
        image: ElementId,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.registry.asset_loaded(image, surface, tracer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::testing::{FakeMonitor, FakeSurface};
    use alloc::string::ToString;
    use alloc::vec;

    const MODAL: ElementId = ElementId(1);
    const OVERLAY: ElementId = ElementId(2);
    const OPEN_A: ElementId = ElementId(3);
    const OPEN_B: ElementId = ElementId(4);
    const CLOSE: ElementId = ElementId(5);
    const LEARN_MORE: ElementId = ElementId(6);
    const SECTION_1: ElementId = ElementId(10);
    const SECTION_2: ElementId = ElementId(11);
    const NAV: ElementId = ElementId(20);
    const LINK_1: ElementId = ElementId(21);
    const LINK_2: ElementId = ElementId(22);
    const LINK_3: ElementId = ElementId(23);
    const LOGO: ElementId = ElementId(24);
    const HEADER: ElementId = ElementId(25);
    const IMG: ElementId = ElementId(30);
    const TAB_1: ElementId = ElementId(40);
    const TAB_2: ElementId = ElementId(41);
    const PANEL_1: ElementId = ElementId(42);
    const PANEL_2: ElementId = ElementId(43);
    const SLIDES: [ElementId; 3] = [ElementId(50), ElementId(51), ElementId(52)];
    const DOTS: ElementId = ElementId(53);
    const LEFT: ElementId = ElementId(54);
    const RIGHT: ElementId = ElementId(55);

    fn layout() -> PageLayout {
        PageLayout {
            slides: SLIDES.to_vec(),
            dot_row: Some(DOTS),
            previous_button: Some(LEFT),
            next_button: Some(RIGHT),
            modal: Some(MODAL),
            overlay: Some(OVERLAY),
            open_modal_buttons: vec![OPEN_A, OPEN_B],
            close_modal_button: Some(CLOSE),
            scroll_buttons: vec![(LEARN_MORE, SECTION_1)],
            nav: Some(NAV),
            nav_height_px: 90.0,
            nav_links: vec![
                (LINK_1, Some(SECTION_1)),
                (LINK_2, Some(SECTION_2)),
                (LINK_3, None),
            ],
            logo: Some(LOGO),
            banner: Some(HEADER),
            sections: vec![SECTION_1, SECTION_2],
            lazy_images: vec![(IMG, "img/digital.jpg".to_string())],
            tabs: vec![(TAB_1, PANEL_1), (TAB_2, PANEL_2)],
        }
    }

    fn install() -> (Page, FakeSurface, FakeMonitor) {
        let mut surface = FakeSurface::new();
        let mut monitor = FakeMonitor::default();
        let page = Page::install(layout(), &PageConfig::default(), &mut surface, &mut monitor);
        (page, surface, monitor)
    }

    fn click(page: &mut Page, surface: &mut FakeSurface, el: ElementId) -> Option<Command> {
        page.dispatch(InputEvent::Click(Some(el)), surface, &mut Tracer::none())
    }

    #[test]
    fn install_registers_every_family() {
        let (page, surface, monitor) = install();
        let fams = page.families();

        assert!(monitor.is_observing(fams.sticky, HEADER));
        assert!(monitor.is_observing(fams.reveal, SECTION_1));
        assert!(monitor.is_observing(fams.reveal, SECTION_2));
        assert!(monitor.is_observing(fams.lazy_load, IMG));
        assert_eq!(
            monitor.config_of(fams.sticky),
            Some(MonitorConfig::sticky_header(90.0))
        );
        assert_eq!(monitor.config_of(fams.reveal), Some(MonitorConfig::reveal()));
        assert_eq!(
            monitor.config_of(fams.lazy_load),
            Some(MonitorConfig::lazy_load())
        );

        // Managed sections start hidden.
        assert_eq!(
            surface.flagged(Flag::SectionHidden),
            &[SECTION_1, SECTION_2]
        );
        assert_eq!(page.deck().map(SlideDeck::len), Some(3));
    }

    #[test]
    fn missing_parts_are_skipped() {
        let mut surface = FakeSurface::new();
        let mut monitor = FakeMonitor::default();
        let layout = PageLayout {
            sections: vec![SECTION_1],
            ..PageLayout::default()
        };
        let mut page = Page::install(layout, &PageConfig::default(), &mut surface, &mut monitor);

        assert!(page.deck().is_none());
        assert!(page.modal().is_none());
        assert!(page.tabs().is_none());
        assert_eq!(page.registry().registered(page.families().sticky), 0);
        assert_eq!(monitor.observe_calls, 1);

        // Input for absent parts resolves but does nothing.
        let out = page.dispatch(
            InputEvent::KeyDown(Key::ArrowRight),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(out, Some(Command::NextSlide));
        assert!(surface.dots.is_empty());
    }

    #[test]
    fn slider_buttons_keys_and_dots() {
        let (mut page, mut surface, _) = install();

        click(&mut page, &mut surface, RIGHT);
        assert_eq!(page.deck().map(SlideDeck::current), Some(1));

        page.dispatch(
            InputEvent::KeyDown(Key::ArrowLeft),
            &mut surface,
            &mut Tracer::none(),
        );
        page.dispatch(
            InputEvent::KeyDown(Key::ArrowLeft),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(page.deck().map(SlideDeck::current), Some(2));
        assert_eq!(surface.offset(SLIDES[2]), Some(0));

        let (_, dot_0, _) = surface.dots[0];
        assert_eq!(
            click(&mut page, &mut surface, dot_0),
            Some(Command::GoToSlide(0))
        );
        assert_eq!(page.deck().map(SlideDeck::current), Some(0));
        assert_eq!(surface.flagged(Flag::DotActive), &[dot_0]);

        // Whitespace inside the dot row is not a dot.
        assert_eq!(click(&mut page, &mut surface, DOTS), None);
        assert_eq!(page.deck().map(SlideDeck::current), Some(0));

        click(&mut page, &mut surface, LEFT);
        assert_eq!(page.deck().map(SlideDeck::current), Some(2));
    }

    #[test]
    fn modal_open_close_and_escape() {
        let (mut page, mut surface, _) = install();

        click(&mut page, &mut surface, OPEN_B);
        assert!(page.modal().is_some_and(Modal::is_open));
        assert!(!surface.has(MODAL, Flag::Hidden));
        assert!(!surface.has(OVERLAY, Flag::Hidden));

        click(&mut page, &mut surface, OVERLAY);
        assert!(surface.has(MODAL, Flag::Hidden));
        assert!(surface.has(OVERLAY, Flag::Hidden));

        click(&mut page, &mut surface, OPEN_A);
        page.dispatch(
            InputEvent::KeyDown(Key::Escape),
            &mut surface,
            &mut Tracer::none(),
        );
        assert!(page.modal().is_some_and(|m| !m.is_open()));
        assert!(surface.has(MODAL, Flag::Hidden));

        // Escape on a closed modal writes nothing.
        surface.flag_writes = 0;
        page.dispatch(
            InputEvent::KeyDown(Key::Escape),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.flag_writes, 0);

        click(&mut page, &mut surface, OPEN_A);
        click(&mut page, &mut surface, CLOSE);
        assert!(surface.has(MODAL, Flag::Hidden));
    }

    #[test]
    fn smooth_scroll_from_button_and_nav_links() {
        let (mut page, mut surface, _) = install();
        click(&mut page, &mut surface, LEARN_MORE);
        click(&mut page, &mut surface, LINK_2);
        click(&mut page, &mut surface, LINK_3);
        assert_eq!(surface.scrolled, &[SECTION_1, SECTION_2]);
    }

    #[test]
    fn nav_link_that_opens_the_modal_keeps_its_role() {
        let mut surface = FakeSurface::new();
        let mut monitor = FakeMonitor::default();
        let mut layout = layout();
        layout.nav_links.push((OPEN_B, None));
        let mut page = Page::install(layout, &PageConfig::default(), &mut surface, &mut monitor);

        assert_eq!(page.roles().role(OPEN_B), Some(Role::OpenModal));
        click(&mut page, &mut surface, OPEN_B);
        assert!(page.modal().is_some_and(Modal::is_open));

        // It is still dimmed with the other links.
        page.dispatch(
            InputEvent::PointerOver(Some(LINK_1)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.opacity(OPEN_B), Some(0.5));
        page.dispatch(
            InputEvent::PointerOut(Some(LINK_1)),
            &mut surface,
            &mut Tracer::none(),
        );

        // Hovering it dims its siblings and the logo.
        let out = page.dispatch(
            InputEvent::PointerOver(Some(OPEN_B)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(out, Some(Command::DimNav { hovered: OPEN_B }));
        assert_eq!(surface.opacity(LINK_1), Some(0.5));
        assert_eq!(surface.opacity(LINK_3), Some(0.5));
        assert_eq!(surface.opacity(LOGO), Some(0.5));
        assert_eq!(surface.opacity(OPEN_B), Some(1.0));
    }

    #[test]
    fn tabs_switch_panels() {
        let (mut page, mut surface, _) = install();
        click(&mut page, &mut surface, TAB_2);

        assert_eq!(page.tabs().map(Tabs::active), Some(1));
        assert_eq!(surface.flagged(Flag::TabActive), &[TAB_2]);
        assert_eq!(surface.flagged(Flag::ContentActive), &[PANEL_2]);

        click(&mut page, &mut surface, TAB_1);
        assert_eq!(surface.flagged(Flag::TabActive), &[TAB_1]);
        assert_eq!(surface.flagged(Flag::ContentActive), &[PANEL_1]);
    }

    #[test]
    fn tab_activation_out_of_range_is_ignored() {
        let mut surface = FakeSurface::new();
        let mut tabs = Tabs::new(vec![(TAB_1, PANEL_1)]).expect("one tab");
        assert!(!tabs.activate(1, &mut surface));
        assert_eq!(surface.flag_writes, 0);
        assert!(Tabs::new(Vec::new()).is_none());
    }

    #[test]
    fn nav_hover_dims_siblings_and_logo() {
        let (mut page, mut surface, _) = install();
        page.dispatch(
            InputEvent::PointerOver(Some(LINK_1)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.opacity(LINK_1), None);
        assert_eq!(surface.opacity(LINK_2), Some(0.5));
        assert_eq!(surface.opacity(LINK_3), Some(0.5));
        assert_eq!(surface.opacity(LOGO), Some(0.5));

        page.dispatch(
            InputEvent::PointerOut(Some(LINK_1)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.opacity(LINK_2), Some(1.0));
        assert_eq!(surface.opacity(LOGO), Some(1.0));

        // Hovering the nav background is not a link.
        surface = FakeSurface::new();
        page.dispatch(
            InputEvent::PointerOver(Some(NAV)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.opacity(LOGO), None);
    }

    #[test]
    fn custom_hover_config_is_used() {
        let mut surface = FakeSurface::new();
        let mut monitor = FakeMonitor::default();
        let config = PageConfig {
            hover: HoverConfig {
                dimmed: 0.2,
                restored: 0.9,
            },
            ..PageConfig::default()
        };
        let mut page = Page::install(layout(), &config, &mut surface, &mut monitor);
        page.dispatch(
            InputEvent::PointerOver(Some(LINK_2)),
            &mut surface,
            &mut Tracer::none(),
        );
        assert_eq!(surface.opacity(LINK_1), Some(0.2));
    }

    #[test]
    fn visibility_flows_through_the_page() {
        let (mut page, mut surface, mut monitor) = install();
        let fams = page.families();

        let notice = |family, target, is_intersecting| VisibilityNotice {
            family,
            target,
            is_intersecting,
        };

        page.visibility_changed(
            notice(fams.sticky, HEADER, false),
            &mut surface,
            &mut monitor,
            &mut Tracer::none(),
        );
        assert!(surface.has(NAV, Flag::Sticky));

        let out = page.visibility_changed(
            notice(fams.reveal, SECTION_2, true),
            &mut surface,
            &mut monitor,
            &mut Tracer::none(),
        );
        assert_eq!(out, NoticeOutcome::Completed);
        assert_eq!(surface.flagged(Flag::SectionHidden), &[SECTION_1]);

        page.visibility_changed(
            notice(fams.lazy_load, IMG, true),
            &mut surface,
            &mut monitor,
            &mut Tracer::none(),
        );
        assert_eq!(surface.source(IMG).as_deref(), Some("img/digital.jpg"));
        surface.set_flag(IMG, Flag::LowQuality, true);
        assert!(page.asset_loaded(IMG, &mut surface, &mut Tracer::none()));
        assert!(!surface.has(IMG, Flag::LowQuality));

        page.visibility_changed(
            notice(fams.sticky, HEADER, true),
            &mut surface,
            &mut monitor,
            &mut Tracer::none(),
        );
        assert!(!surface.has(NAV, Flag::Sticky));
    }

    #[test]
    fn programmatic_navigation_through_deck_mut() {
        let (mut page, mut surface, _) = install();
        let deck = page.deck_mut().expect("deck installed");
        assert!(deck.go_to(2, &mut surface, &mut Tracer::none()));
        deck.next(&mut surface, &mut Tracer::none());
        assert_eq!(deck.current(), 0);
        assert_eq!(page.roles().role(LEFT), Some(Role::PreviousSlide));
    }
}
