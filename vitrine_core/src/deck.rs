// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide deck (carousel) state.
//!
//! A [`SlideDeck`] owns a fixed, non-empty sequence of slide elements, one
//! generated dot per slide, and the current index. Slides sit side by side:
//! slide `i` is offset by `100 × (i − current)` percent of its own width, so
//! the current slide is at 0 and the others are shifted proportionally to
//! their distance. Exactly one dot carries [`Flag::DotActive`], the one for the
//! current slide.
//!
//! Navigation wraps: [`next`](SlideDeck::next) from the last slide goes to the
//! first, [`previous`](SlideDeck::previous) from the first goes to the last.

use alloc::vec::Vec;

use crate::backend::RenderSurface;
use crate::element::{ElementId, Flag};
use crate::trace::{Navigation, SlideChangedEvent, Tracer};

/// The state of one slide dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotIndicator {
    /// The generated dot element.
    pub element: ElementId,
    /// Slide the dot selects.
    pub slide_index: usize,
    /// Whether the dot marks the current slide.
    pub active: bool,
}

/// An ordered, fixed-length carousel with one current slide.
#[derive(Clone, Debug)]
pub struct SlideDeck {
    slides: Vec<ElementId>,
    dots: Vec<ElementId>,
    current: usize,
}

impl SlideDeck {
    /// Builds a deck from `slides`, generating one dot per slide in
    /// `dot_row`, and renders the initial state (slide 0 current).
    ///
    /// Returns `None` if `slides` is empty or a dot could not be created.
    pub fn new(
        slides: Vec<ElementId>,
        dot_row: ElementId,
        surface: &mut dyn RenderSurface,
    ) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let dots = (0..slides.len())
            .map(|i| surface.insert_dot(dot_row, i))
            .collect::<Option<Vec<_>>>()?;
        let deck = Self {
            slides,
            dots,
            current: 0,
        };
        deck.render(surface);
        Some(deck)
    }

    /// Returns the number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; a deck has at least one slide.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Returns the current slide index.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns the slide elements in order.
    #[must_use]
    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    /// Returns the dot indicators in slide order.
    pub fn dots(&self) -> impl Iterator<Item = DotIndicator> + '_ {
        self.dots
            .iter()
            .enumerate()
            .map(|(slide_index, &element)| DotIndicator {
                element,
                slide_index,
                active: slide_index == self.current,
            })
    }

    /// Returns the slide a dot element selects, if it is one of this deck's
    /// dots.
    #[must_use]
    pub fn dot_slide(&self, dot: ElementId) -> Option<usize> {
        self.dots.iter().position(|&d| d == dot)
    }

    /// Returns the horizontal offset of slide `index` in percent.
    #[must_use]
    pub fn offset_percent(&self, index: usize) -> Option<i64> {
        (index < self.slides.len()).then(|| offset(index, self.current))
    }

    /// Makes `index` the current slide.
    ///
    /// Out-of-range indices are ignored and return `false`.
    pub fn go_to(
        &mut self,
        index: usize,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.move_to(index, Navigation::GoTo, surface, tracer);
        true
    }

    /// Advances to the next slide, wrapping from the last to the first.
    pub fn next(&mut self, surface: &mut dyn RenderSurface, tracer: &mut Tracer<'_>) {
        let index = if self.current + 1 == self.slides.len() {
            0
        } else {
            self.current + 1
        };
        self.move_to(index, Navigation::Next, surface, tracer);
    }

    /// Goes back to the previous slide, wrapping from the first to the last.
    pub fn previous(&mut self, surface: &mut dyn RenderSurface, tracer: &mut Tracer<'_>) {
        let index = if self.current == 0 {
            self.slides.len() - 1
        } else {
            self.current - 1
        };
        self.move_to(index, Navigation::Previous, surface, tracer);
    }

    fn move_to(
        &mut self,
        index: usize,
        cause: Navigation,
        surface: &mut dyn RenderSurface,
        tracer: &mut Tracer<'_>,
    ) {
        debug_assert!(index < self.slides.len(), "slide index out of range");
        let from = self.current;
        self.current = index;
        self.render(surface);
        tracer.slide_changed(&SlideChangedEvent {
            from,
            to: index,
            len: self.slides.len(),
            cause,
        });
    }

    /// Repositions every slide and syncs the dots to the current index.
    fn render(&self, surface: &mut dyn RenderSurface) {
        for (i, &slide) in self.slides.iter().enumerate() {
            surface.set_offset_percent(slide, offset(i, self.current));
        }
        for dot in self.dots() {
            surface.set_flag(dot.element, Flag::DotActive, dot.active);
        }
    }
}

/// Offset of slide `index` when `current` is on display.
fn offset(index: usize, current: usize) -> i64 {
    100 * (index as i64 - current as i64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;

    const ROW: ElementId = ElementId(99);

    fn slides(n: u32) -> Vec<ElementId> {
        (0..n).map(ElementId).collect()
    }

    fn deck(n: u32, surface: &mut FakeSurface) -> SlideDeck {
        SlideDeck::new(slides(n), ROW, surface).expect("non-empty deck")
    }

    /// Checks the rendered surface against the deck's own state.
    fn assert_rendered(deck: &SlideDeck, surface: &FakeSurface) {
        for (i, &slide) in deck.slides().iter().enumerate() {
            let expected = 100 * (i as i64 - deck.current() as i64);
            assert_eq!(surface.offset(slide), Some(expected), "slide {i} offset");
        }
        let active: Vec<_> = deck.dots().filter(|d| d.active).collect();
        assert_eq!(active.len(), 1, "exactly one active dot");
        assert_eq!(active[0].slide_index, deck.current());
        assert_eq!(
            surface.flagged(Flag::DotActive),
            &[active[0].element],
            "surface shows one active dot"
        );
    }

    #[test]
    fn empty_deck_is_refused() {
        let mut surface = FakeSurface::new();
        assert!(SlideDeck::new(Vec::new(), ROW, &mut surface).is_none());
        assert!(surface.dots.is_empty());
    }

    #[test]
    fn failed_dot_creation_is_refused() {
        let mut surface = FakeSurface::new();
        surface.refuse_dots = true;
        assert!(SlideDeck::new(slides(3), ROW, &mut surface).is_none());
    }

    #[test]
    fn initial_state() {
        let mut surface = FakeSurface::new();
        let deck = deck(4, &mut surface);

        assert_eq!(deck.current(), 0);
        assert_eq!(deck.len(), 4);
        assert!(!deck.is_empty());
        assert_eq!(surface.dots.len(), 4);
        for (i, &(row, _, slide_index)) in surface.dots.iter().enumerate() {
            assert_eq!(row, ROW);
            assert_eq!(slide_index, i);
        }
        for i in 0..4 {
            assert_eq!(surface.offset(ElementId(i)), Some(100 * i64::from(i)));
        }
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(5, &mut surface);

        deck.previous(&mut surface, &mut Tracer::none());

        assert_eq!(deck.current(), 4);
        assert_eq!(surface.offset(ElementId(4)), Some(0));
        assert_eq!(surface.offset(ElementId(0)), Some(-400));
        assert_eq!(deck.offset_percent(0), Some(-400));
        let active: Vec<_> = deck.dots().filter(|d| d.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].slide_index, 4);
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn next_from_last_wraps_to_first() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(3, &mut surface);
        deck.go_to(2, &mut surface, &mut Tracer::none());

        deck.next(&mut surface, &mut Tracer::none());

        assert_eq!(deck.current(), 0);
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn next_n_times_is_a_full_cycle() {
        for n in 1..=6 {
            for start in 0..n {
                let mut surface = FakeSurface::new();
                let mut deck = deck(n, &mut surface);
                deck.go_to(start as usize, &mut surface, &mut Tracer::none());
                for _ in 0..n {
                    deck.next(&mut surface, &mut Tracer::none());
                }
                assert_eq!(deck.current(), start as usize, "n={n} start={start}");
            }
        }
    }

    #[test]
    fn mixed_navigation_stays_in_range() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(4, &mut surface);
        // Deterministic pseudo-random walk.
        let mut state: u32 = 0x2545_f491;
        for _ in 0..200 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state & 1 == 0 {
                deck.next(&mut surface, &mut Tracer::none());
            } else {
                deck.previous(&mut surface, &mut Tracer::none());
            }
            assert!(deck.current() < deck.len());
            assert_rendered(&deck, &surface);
        }
    }

    #[test]
    fn go_to_sets_relative_offsets() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(5, &mut surface);

        assert!(deck.go_to(2, &mut surface, &mut Tracer::none()));

        assert_eq!(deck.current(), 2);
        let offsets: Vec<_> = (0..5).map(|i| deck.offset_percent(i)).collect();
        assert_eq!(
            offsets,
            &[Some(-200), Some(-100), Some(0), Some(100), Some(200)]
        );
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(3, &mut surface);
        deck.go_to(1, &mut surface, &mut Tracer::none());

        assert!(!deck.go_to(3, &mut surface, &mut Tracer::none()));
        assert!(!deck.go_to(usize::MAX, &mut surface, &mut Tracer::none()));

        assert_eq!(deck.current(), 1);
        assert_eq!(deck.offset_percent(3), None);
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn single_slide_deck_wraps_onto_itself() {
        let mut surface = FakeSurface::new();
        let mut deck = deck(1, &mut surface);
        deck.next(&mut surface, &mut Tracer::none());
        deck.previous(&mut surface, &mut Tracer::none());
        assert_eq!(deck.current(), 0);
        assert_rendered(&deck, &surface);
    }

    #[test]
    fn dot_slide_resolves_generated_dots_only() {
        let mut surface = FakeSurface::new();
        let deck = deck(3, &mut surface);
        let (_, third_dot, _) = surface.dots[2];
        assert_eq!(deck.dot_slide(third_dot), Some(2));
        assert_eq!(deck.dot_slide(ROW), None);
    }
}
