//! The render-host capability interface.
//!
//! [`RenderHost`] is the narrow seam between the engine and whatever
//! retained-mode UI primitive actually displays cards — a browser DOM, a
//! native widget tree, a canvas. The engine only ever creates elements,
//! fills their content, positions them, toggles state flags, removes them,
//! measures them, and scrolls the container. Measurement returning `None`
//! is the desync signal: the element is gone and the operation becomes a
//! silent no-op.

use slotmap::new_key_type;

use crate::card::{Card, CardId};
use crate::geometry::{Point, Rect};
use crate::layout::CardPosition;

new_key_type! {
    /// Opaque identifier for a host element. Copy, lightweight (u64).
    pub struct ElementId;
}

// ---------------------------------------------------------------------------
// StateFlag
// ---------------------------------------------------------------------------

/// Boolean presentation flags toggled on card elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    /// The card for the currently open document.
    Active,
    /// The card carrying the keyboard focus ring.
    Focused,
}

// ---------------------------------------------------------------------------
// HostError
// ---------------------------------------------------------------------------

/// Errors surfaced by a host implementation.
///
/// None of these are fatal: the renderer degrades the affected card and
/// continues the batch.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("content rendering failed for {card_id}: {message}")]
    ContentRender { card_id: String, message: String },
    #[error("element is no longer attached")]
    Detached,
    #[error("cannot open document {path}: {message}")]
    OpenDocument { path: String, message: String },
}

// ---------------------------------------------------------------------------
// RenderHost
// ---------------------------------------------------------------------------

/// Capability interface the engine renders through.
///
/// All rects — container and element — live in one viewport coordinate
/// space, so an element's on-screen rect shifts as the container scrolls
/// (the way `getBoundingClientRect` behaves in a DOM host). Positions
/// applied via [`apply_position`](RenderHost::apply_position) are content
/// coordinates: the host is responsible for subtracting its scroll offset
/// when presenting.
pub trait RenderHost {
    /// Create an empty card element attached to the container.
    fn create_element(&mut self, card_id: &CardId) -> ElementId;

    /// Fill an element with rich content for `card`.
    ///
    /// May fail (the external content renderer is allowed to reject
    /// malformed input); the caller falls back to
    /// [`render_plain`](RenderHost::render_plain).
    fn render_rich(&mut self, element: ElementId, card: &Card) -> Result<(), HostError>;

    /// Fill an element with plain-text content for `card`. Infallible.
    fn render_plain(&mut self, element: ElementId, card: &Card);

    /// Move/size an element to `position` (content coordinates).
    fn apply_position(&mut self, element: ElementId, position: &CardPosition);

    /// Toggle a presentation flag. Must be idempotent.
    fn set_flag(&mut self, element: ElementId, flag: StateFlag, on: bool);

    /// Detach and destroy an element.
    fn remove_element(&mut self, element: ElementId);

    /// The element's current viewport rect, or `None` if it is detached.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    /// Whether the element is still attached.
    fn is_attached(&self, element: ElementId) -> bool {
        self.element_rect(element).is_some()
    }

    /// The scrollable container's viewport rect.
    fn container_rect(&self) -> Rect;

    /// Current scroll offset of the container.
    fn scroll_offset(&self) -> Point;

    /// Set the container's scroll offset. The host clamps to its own
    /// scrollable range.
    fn set_scroll_offset(&mut self, offset: Point);

    /// Open the source document behind a card (e.g. in the host editor).
    fn open_document(&mut self, path: &str) -> Result<(), HostError>;
}
