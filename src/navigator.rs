//! Keyboard navigation: a state machine over the focused card index.
//!
//! The navigator owns the single logical focus among rendered cards and
//! translates directional/page/home/end moves into index transitions using
//! the active layout's column count. It never touches the host itself; the
//! panel applies the resulting highlight and scroll effects.

use crate::card::CardId;
use crate::frame::Debouncer;
use crate::host::RenderHost;
use crate::render::CardRenderer;

/// Trailing delay for the visual focus update, so rapid key repeats do not
/// thrash styling.
const FOCUS_STYLE_DEBOUNCE_MS: f64 = 30.0;

// ---------------------------------------------------------------------------
// FocusState
// ---------------------------------------------------------------------------

/// The navigator's externally visible state.
///
/// `focused_index` indexes the currently rendered card sequence, not a
/// stable card id — it is re-clamped whenever the rendered set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    pub focused_index: Option<usize>,
    pub is_focused: bool,
}

// ---------------------------------------------------------------------------
// KeyboardNavigator
// ---------------------------------------------------------------------------

/// Maps key-driven move requests onto the focused index.
#[derive(Debug)]
pub struct KeyboardNavigator {
    state: FocusState,
    style_debounce: Debouncer,
}

impl KeyboardNavigator {
    /// Create an unfocused navigator.
    pub fn new() -> Self {
        Self {
            state: FocusState::default(),
            style_debounce: Debouncer::new(FOCUS_STYLE_DEBOUNCE_MS),
        }
    }

    /// The current focus state.
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// The focused index, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.state.focused_index
    }

    /// Whether the navigator holds focus.
    pub fn is_focused(&self) -> bool {
        self.state.is_focused
    }

    // ── Acquire / release ────────────────────────────────────────────

    /// Acquire focus.
    ///
    /// Preference order: the active card's index, else the first card fully
    /// visible within the container, else index 0. With no rendered cards
    /// the navigator stays unfocused.
    pub fn focus<H: RenderHost>(
        &mut self,
        host: &H,
        renderer: &CardRenderer,
        active: Option<&CardId>,
        now_ms: f64,
    ) -> Option<usize> {
        if renderer.card_count() == 0 {
            return None;
        }
        let index = active
            .and_then(|id| renderer.index_of(id))
            .or_else(|| first_fully_visible(host, renderer))
            .unwrap_or(0);
        self.state.is_focused = true;
        self.set_index(index, now_ms);
        Some(index)
    }

    /// Release focus and clear the index.
    pub fn blur(&mut self) {
        self.state = FocusState::default();
        self.style_debounce.cancel();
    }

    // ── Moves ────────────────────────────────────────────────────────

    /// Directional move by `(row_delta, col_delta)`.
    ///
    /// Grid-shaped layouts wrap across columns (left from column 0 lands on
    /// the previous row's last column) but never past the ends: an
    /// out-of-range target is a no-op. Returns the new index when it
    /// changed.
    pub fn move_focus(
        &mut self,
        row_delta: i64,
        col_delta: i64,
        columns: usize,
        total: usize,
        now_ms: f64,
    ) -> Option<usize> {
        let current = self.state.focused_index?;
        let target = if columns <= 1 {
            current as i64 + row_delta + col_delta
        } else {
            grid_target(current, row_delta, col_delta, columns)
        };
        self.accept_in_range(current, target, total, now_ms)
    }

    /// Page move by `step` cards in `direction` (+1 forward, -1 back).
    ///
    /// Unlike single-step moves, paging past an end snaps to the boundary
    /// index rather than being a no-op.
    pub fn page_move(
        &mut self,
        direction: i64,
        step: usize,
        total: usize,
        now_ms: f64,
    ) -> Option<usize> {
        if total == 0 {
            return None;
        }
        let current = self.state.focused_index?;
        let target = (current as i64 + direction * step as i64).clamp(0, total as i64 - 1);
        self.commit_if_changed(current, target as usize, now_ms)
    }

    /// Jump to the first card.
    pub fn home(&mut self, total: usize, now_ms: f64) -> Option<usize> {
        let current = self.state.focused_index?;
        if total == 0 {
            return None;
        }
        self.commit_if_changed(current, 0, now_ms)
    }

    /// Jump to the last card.
    pub fn end(&mut self, total: usize, now_ms: f64) -> Option<usize> {
        let current = self.state.focused_index?;
        if total == 0 {
            return None;
        }
        self.commit_if_changed(current, total - 1, now_ms)
    }

    // ── Structural changes ───────────────────────────────────────────

    /// Re-validate after the rendered set changed: clamp the index to the
    /// new count without moving focus otherwise. Returns the index whose
    /// highlight should be re-applied.
    pub fn revalidate(&mut self, total: usize) -> Option<usize> {
        let current = self.state.focused_index?;
        if total == 0 {
            self.state.focused_index = None;
            return None;
        }
        let clamped = current.min(total - 1);
        self.state.focused_index = Some(clamped);
        Some(clamped)
    }

    /// Whether the debounced visual-focus update is due this frame.
    pub fn poll_style(&mut self, now_ms: f64) -> bool {
        self.style_debounce.poll(now_ms)
    }

    /// Whether a visual-focus update is still armed.
    pub fn style_pending(&self) -> bool {
        self.style_debounce.is_pending()
    }

    // ── Internals ────────────────────────────────────────────────────

    fn accept_in_range(
        &mut self,
        current: usize,
        target: i64,
        total: usize,
        now_ms: f64,
    ) -> Option<usize> {
        if target < 0 || target >= total as i64 {
            return None;
        }
        self.commit_if_changed(current, target as usize, now_ms)
    }

    fn commit_if_changed(&mut self, current: usize, target: usize, now_ms: f64) -> Option<usize> {
        if target == current {
            return None;
        }
        self.set_index(target, now_ms);
        Some(target)
    }

    fn set_index(&mut self, index: usize, now_ms: f64) {
        self.state.focused_index = Some(index);
        self.style_debounce.touch(now_ms);
    }
}

impl Default for KeyboardNavigator {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Index arithmetic
// ---------------------------------------------------------------------------

/// Convert a 1-D index to `(row, col)`, apply the deltas with column wrap,
/// and convert back. May return an out-of-range value; the caller bounds it.
fn grid_target(current: usize, row_delta: i64, col_delta: i64, columns: usize) -> i64 {
    let cols = columns as i64;
    let mut row = current as i64 / cols;
    let mut col = current as i64 % cols + col_delta;
    while col < 0 {
        col += cols;
        row -= 1;
    }
    while col >= cols {
        col -= cols;
        row += 1;
    }
    row += row_delta;
    row * cols + col
}

/// The first card whose element is entirely inside the container rect.
fn first_fully_visible<H: RenderHost>(host: &H, renderer: &CardRenderer) -> Option<usize> {
    let container = host.container_rect();
    (0..renderer.card_count()).find(|&index| {
        renderer
            .element_at(index)
            .and_then(|element| host.element_rect(element))
            .is_some_and(|rect| container.contains_rect(rect))
    })
}

// ===========================================================================
// Tests
// ===========================================================================
