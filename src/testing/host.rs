//! An in-memory render host with a mutation journal.

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::card::{Card, CardId};
use crate::geometry::{Point, Rect, Size};
use crate::host::{ElementId, HostError, RenderHost, StateFlag};
use crate::layout::CardPosition;

/// Pseudo content height assigned to auto-height cards that have not been
/// given an explicit measurement.
const DEFAULT_AUTO_EXTENT: f32 = 120.0;

// ---------------------------------------------------------------------------
// FakeElement
// ---------------------------------------------------------------------------

/// One fake host element.
#[derive(Debug, Clone)]
pub struct FakeElement {
    pub card_id: CardId,
    /// Last content applied, if any.
    pub content: Option<String>,
    /// Whether the last content fill was rich (vs. plain fallback).
    pub rich: bool,
    /// Last position applied, if any.
    pub position: Option<CardPosition>,
    /// Active/focused flags currently set.
    pub flags: HashSet<StateFlag>,
    /// Content-space rect (scroll-independent).
    pub content_rect: Rect,
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

/// A [`RenderHost`] over an in-memory element arena.
///
/// Every mutation appends one line to the journal (`create a.md`,
/// `content a.md rich`, `position a.md (0,0 300x300)`, `flag ...`,
/// `remove ...`, `scroll ...`, `open ...`) so tests can assert exactly what
/// the engine touched. Element viewport rects are content rects shifted by
/// the current scroll offset, the way a DOM host would measure them.
#[derive(Debug)]
pub struct FakeHost {
    elements: SlotMap<ElementId, FakeElement>,
    container: Rect,
    scroll: Point,
    /// Scrollable content extent used for clamping the offset.
    content_extent: Size,
    journal: Vec<String>,
    fail_rich: HashSet<String>,
    /// Paths opened via `open_document`, in order.
    pub opened: Vec<String>,
}

impl FakeHost {
    /// Create a host whose container sits at the origin with `size`.
    pub fn new(size: Size) -> Self {
        Self {
            elements: SlotMap::with_key(),
            container: size.to_rect(),
            scroll: Point::ZERO,
            content_extent: Size::new(1_000_000.0, 1_000_000.0),
            journal: Vec::new(),
            fail_rich: HashSet::new(),
            opened: Vec::new(),
        }
    }

    // ── Test hooks ───────────────────────────────────────────────────

    /// Insert an element directly with a content rect, bypassing the
    /// renderer. For scroller/navigator tests.
    pub fn insert_element(&mut self, card_id: &CardId, content_rect: Rect) -> ElementId {
        self.elements.insert(FakeElement {
            card_id: card_id.clone(),
            content: None,
            rich: false,
            position: None,
            flags: HashSet::new(),
            content_rect,
        })
    }

    /// Override an element's content rect (simulates content settling at a
    /// new size).
    pub fn set_element_content_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(element) {
            el.content_rect = rect;
        }
    }

    /// Make `render_rich` fail for the given card id.
    pub fn fail_rich_for(&mut self, card_id: &str) {
        self.fail_rich.insert(card_id.to_owned());
    }

    /// Resize the container rect.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = Rect::new(self.container.x, self.container.y, size.width, size.height);
    }

    /// Set the scrollable content extent used for offset clamping.
    pub fn set_content_extent(&mut self, extent: Size) {
        self.content_extent = extent;
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Number of attached elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The element data, if attached.
    pub fn element(&self, element: ElementId) -> Option<&FakeElement> {
        self.elements.get(element)
    }

    /// Find the element for a card id.
    pub fn element_for_card(&self, card_id: &CardId) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| &el.card_id == card_id)
            .map(|(id, _)| id)
    }

    /// Whether the element currently has `flag` set.
    pub fn has_flag(&self, element: ElementId, flag: StateFlag) -> bool {
        self.elements
            .get(element)
            .is_some_and(|el| el.flags.contains(&flag))
    }

    /// The mutation journal so far.
    pub fn journal(&self) -> &[String] {
        &self.journal
    }

    /// Forget the journal (typically between test phases).
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn log(&mut self, line: String) {
        self.journal.push(line);
    }

    fn clamp_scroll(&self, offset: Point) -> Point {
        let max_x = (self.content_extent.width - self.container.width).max(0.0);
        let max_y = (self.content_extent.height - self.container.height).max(0.0);
        Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
    }
}

impl RenderHost for FakeHost {
    fn create_element(&mut self, card_id: &CardId) -> ElementId {
        self.log(format!("create {card_id}"));
        self.elements.insert(FakeElement {
            card_id: card_id.clone(),
            content: None,
            rich: false,
            position: None,
            flags: HashSet::new(),
            content_rect: Rect::EMPTY,
        })
    }

    fn render_rich(&mut self, element: ElementId, card: &Card) -> Result<(), HostError> {
        if self.fail_rich.contains(card.id.as_str()) {
            self.log(format!("content {} rich-error", card.id));
            return Err(HostError::ContentRender {
                card_id: card.id.as_str().to_owned(),
                message: "injected failure".to_owned(),
            });
        }
        self.log(format!("content {} rich", card.id));
        if let Some(el) = self.elements.get_mut(element) {
            el.content = Some(format!("{}\n{}", card.title, card.body));
            el.rich = true;
        }
        Ok(())
    }

    fn render_plain(&mut self, element: ElementId, card: &Card) {
        self.log(format!("content {} plain", card.id));
        if let Some(el) = self.elements.get_mut(element) {
            el.content = Some(format!("{} {}", card.title, card.body));
            el.rich = false;
        }
    }

    fn apply_position(&mut self, element: ElementId, position: &CardPosition) {
        let Some(el) = self.elements.get_mut(element) else {
            return;
        };
        // Auto heights keep a previously settled measurement.
        let height = position.height.or(if el.content_rect.height > 0.0 {
            el.content_rect.height
        } else {
            DEFAULT_AUTO_EXTENT
        });
        el.content_rect = Rect::new(position.x, position.y, position.width, height);
        el.position = Some(position.clone());
        let id = el.card_id.clone();
        self.log(format!(
            "position {id} ({:.0},{:.0} {:.0}x{:.0})",
            position.x, position.y, position.width, height
        ));
    }

    fn set_flag(&mut self, element: ElementId, flag: StateFlag, on: bool) {
        let Some(el) = self.elements.get_mut(element) else {
            return;
        };
        let changed = if on {
            el.flags.insert(flag)
        } else {
            el.flags.remove(&flag)
        };
        if changed {
            let id = el.card_id.clone();
            self.log(format!("flag {id} {flag:?}={on}"));
        }
    }

    fn remove_element(&mut self, element: ElementId) {
        if let Some(el) = self.elements.remove(element) {
            self.log(format!("remove {}", el.card_id));
        }
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(element).map(|el| {
            el.content_rect
                .translate(self.container.origin() - self.scroll)
        })
    }

    fn container_rect(&self) -> Rect {
        self.container
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: Point) {
        let clamped = self.clamp_scroll(offset);
        if clamped != self.scroll {
            self.scroll = clamped;
            self.log(format!("scroll ({:.0},{:.0})", clamped.x, clamped.y));
        }
    }

    fn open_document(&mut self, path: &str) -> Result<(), HostError> {
        self.log(format!("open {path}"));
        self.opened.push(path.to_owned());
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
