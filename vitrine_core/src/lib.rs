// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state for interactive page chrome.
//!
//! `vitrine_core` holds the stateful parts of a marketing page's chrome (an
//! image carousel and a set of visibility-triggered effects) together with the
//! thin glue around them (modal, smooth scroll, tabs, nav hover). It is
//! `no_std` compatible (with `alloc`) and never touches a platform API
//! directly: everything visible goes through the [`RenderSurface`] trait and
//! every intersection report comes in as a [`VisibilityNotice`].
//!
//! # Architecture
//!
//! Two independent signal paths share only the render surface:
//!
//! ```text
//!   click / keydown / pointer ──► InputEvent ──► RoleMap::resolve() ──► Command
//!                                                                         │
//!                 ┌───────────────────────────────────────────────────────┘
//!                 ▼
//!   SlideDeck / Modal / Tabs / NavHover ──► RenderSurface
//!
//!   VisibilityMonitor ──► VisibilityNotice ──► VisibilityEffectRegistry::notify()
//!                                                     │
//!                                                     ▼
//!                                      Effect ──► RenderSurface
//! ```
//!
//! **[`deck`]**: Fixed-length carousel with wrap-around navigation, percentage
//! offsets and one active dot per current slide.
//!
//! **[`visibility`]**: Monitor families, toggle and one-shot rules, and the
//! registry that applies their effects.
//!
//! **[`input`]**: Typed input events, roles tagged at setup, and commands.
//!
//! **[`page`]**: Page assembly from a discovered layout, plus the modal, tabs
//! and nav hover components.
//!
//! **[`backend`]**: The [`RenderSurface`] and
//! [`VisibilityMonitor`](backend::VisibilityMonitor) traits that platform
//! backends implement.
//!
//! **[`element`]**: Element handles and presentation flags.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! state-transition instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`RenderSurface`]: backend::RenderSurface
//! [`VisibilityNotice`]: visibility::VisibilityNotice

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod deck;
pub mod element;
pub mod input;
pub mod page;
pub mod trace;
pub mod visibility;

#[cfg(test)]
mod testing;
