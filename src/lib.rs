//! # cardwall
//!
//! A card-panel layout and incremental rendering engine: arranges a
//! changing collection of document-summary "cards" inside a scrollable
//! panel, keeps the retained element tree in sync with minimal mutations,
//! and provides 2-D keyboard navigation and smooth centering.
//!
//! The engine never touches a concrete UI toolkit. It renders through the
//! [`host::RenderHost`] capability trait, so a browser DOM, a native
//! widget tree, or the in-memory [`testing::FakeHost`] can all sit behind
//! the same layout, reconciliation, and navigation logic.
//!
//! ## Core Systems
//!
//! - **[`layout`]** — Pure arrangement strategies: list, grid, masonry
//! - **[`render`]** — Incremental reconciliation with batched, coalesced passes
//! - **[`navigator`]** — Keyboard focus state machine over grid coordinates
//! - **[`scroll`]** — Centering, eased animation, convergence for unstable content
//! - **[`frame`]** — The shared cancelable frame scheduler and debouncers
//! - **[`panel`]** — The facade tying everything together
//! - **[`event`]** — Crossterm-decoupled input events and key bindings
//! - **[`runtime`]** — Tokio frame-loop driver
//! - **[`testing`]** — Headless FakeHost + Pilot for driving the panel in tests
//! - **[`geometry`]** — Point, Size, Rect, Spacing primitives

// Foundation
pub mod geometry;

// Data model
pub mod card;
pub mod config;

// Core systems
pub mod frame;
pub mod host;
pub mod layout;
pub mod render;

// Navigation and scrolling
pub mod navigator;
pub mod scroll;

// Events
pub mod event;

// Panel facade and driver
pub mod panel;
pub mod runtime;

// Headless testing
pub mod testing;

pub use card::{Card, CardId};
pub use config::{CardHeight, LayoutKind, PanelSettings, ScrollAxis};
pub use host::{ElementId, HostError, RenderHost, StateFlag};
pub use panel::CardPanel;
