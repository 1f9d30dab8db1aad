//! The card panel: central owner of config, renderer, navigation, scroll.
//!
//! [`CardPanel`] ties the engine together behind the public operations the
//! embedding shell calls: render a card list, move focus, scroll, open
//! documents, apply settings, resize, dispose. All cooperative work flows
//! through the panel's single [`FrameScheduler`]; the shell (or the
//! [`runtime`](crate::runtime) driver) pumps [`on_frame`](CardPanel::on_frame).

use crate::card::{Card, CardId};
use crate::config::{LayoutConfig, PanelSettings};
use crate::event::{InputEvent, KeyEvent, NavAction, NavBindingRegistry};
use crate::frame::{Debouncer, FrameScheduler, FrameTick};
use crate::geometry::{Point, Size};
use crate::host::{ElementId, RenderHost};
use crate::layout;
use crate::navigator::KeyboardNavigator;
use crate::render::{CardRenderer, RenderOutcome, RenderRequest};
use crate::scroll::Scroller;

/// Trailing delay for container-resize recomputation.
const RESIZE_DEBOUNCE_MS: f64 = 100.0;

// ---------------------------------------------------------------------------
// PanelTask
// ---------------------------------------------------------------------------

/// Work items the panel dispatches when the scheduler delivers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTask {
    /// One renderer batch step.
    RenderBatch,
    /// One scroll animation/convergence step.
    Scroll,
}

// ---------------------------------------------------------------------------
// CardPanel
// ---------------------------------------------------------------------------

/// The engine facade over a [`RenderHost`].
pub struct CardPanel<H: RenderHost> {
    host: H,
    settings: PanelSettings,
    config: LayoutConfig,
    renderer: CardRenderer,
    navigator: KeyboardNavigator,
    scroller: Scroller,
    bindings: NavBindingRegistry,
    frames: FrameScheduler<PanelTask>,
    resize_debounce: Debouncer,
    pending_resize: Option<Size>,
    /// Id of the card for the currently open document, if any.
    active: Option<CardId>,
    /// Timestamp of the most recent frame; input handled between frames
    /// uses it.
    clock: FrameTick,
}

impl<H: RenderHost> CardPanel<H> {
    /// Create a panel over `host` with the given settings.
    pub fn new(host: H, settings: PanelSettings) -> Self {
        let config = LayoutConfig::derive(&settings, host.container_rect().size());
        Self {
            host,
            settings,
            config,
            renderer: CardRenderer::new(),
            navigator: KeyboardNavigator::new(),
            scroller: Scroller::new(),
            bindings: NavBindingRegistry::with_defaults(),
            frames: FrameScheduler::new(),
            resize_debounce: Debouncer::new(RESIZE_DEBOUNCE_MS),
            pending_resize: None,
            active: None,
            clock: FrameTick::new(0, 0.0),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host (test hooks, shell integration).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The current settings snapshot.
    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// The derived layout config.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The key binding registry.
    pub fn bindings_mut(&mut self) -> &mut NavBindingRegistry {
        &mut self.bindings
    }

    /// The focused card index, if the navigator holds focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.navigator.focused_index()
    }

    /// Number of rendered cards as of the last completed pass.
    pub fn card_count(&self) -> usize {
        self.renderer.card_count()
    }

    /// Whether any cooperative work is still pending.
    pub fn has_pending_work(&self) -> bool {
        !self.frames.is_empty()
            || self.resize_debounce.is_pending()
            || self.renderer.is_render_in_flight()
            || self.scroller.is_in_motion()
            || self.navigator.style_pending()
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render a new card list, highlighting `focused` and `active`.
    ///
    /// `active` is remembered as the current-document card for later
    /// focus-acquire and jump-to-active requests. When `focused` is `None`
    /// the navigator's current focus is preserved.
    pub fn render_cards(
        &mut self,
        cards: Vec<Card>,
        focused: Option<CardId>,
        active: Option<CardId>,
    ) {
        self.active = active.clone();
        let focused = focused.or_else(|| self.focused_card_id());
        let request = RenderRequest::new(cards)
            .with_focused(focused)
            .with_active(active);
        self.renderer
            .request_render(request, &self.config, &self.host, &mut self.frames);
    }

    // ── Focus ────────────────────────────────────────────────────────

    /// Acquire keyboard focus: the active card, else the first fully
    /// visible card, else the first card.
    pub fn focus_navigator(&mut self) {
        let acquired = self.navigator.focus(
            &self.host,
            &self.renderer,
            self.active.as_ref(),
            self.clock.now_ms,
        );
        if let Some(index) = acquired {
            self.apply_focus_flags();
            self.center_index(index, true);
        }
    }

    /// Release keyboard focus.
    pub fn blur_navigator(&mut self) {
        self.navigator.blur();
        self.apply_focus_flags();
    }

    fn focused_card_id(&self) -> Option<CardId> {
        self.navigator
            .focused_index()
            .and_then(|index| self.renderer.card_id_at(index))
            .cloned()
    }

    fn apply_focus_flags(&mut self) {
        let focused = self.focused_card_id();
        self.renderer
            .apply_state_flags(&mut self.host, focused.as_ref(), self.active.as_ref());
    }

    fn center_index(&mut self, index: usize, animate: bool) {
        if let Some(element) = self.renderer.element_at(index) {
            self.scroller.center_card(
                &mut self.host,
                element,
                animate,
                &self.config,
                self.clock,
                &mut self.frames,
            );
        }
    }

    // ── Scrolling ────────────────────────────────────────────────────

    /// Scroll up by `count` card rows.
    pub fn scroll_up(&mut self, count: usize) {
        self.scroll_cards(0.0, -(count as f32));
    }

    /// Scroll down by `count` card rows.
    pub fn scroll_down(&mut self, count: usize) {
        self.scroll_cards(0.0, count as f32);
    }

    /// Scroll left by `count` card columns.
    pub fn scroll_left(&mut self, count: usize) {
        self.scroll_cards(-(count as f32), 0.0);
    }

    /// Scroll right by `count` card columns.
    pub fn scroll_right(&mut self, count: usize) {
        self.scroll_cards(count as f32, 0.0);
    }

    fn scroll_cards(&mut self, dx_cards: f32, dy_cards: f32) {
        let delta = Point::new(
            dx_cards * self.config.column_stride(),
            dy_cards * self.config.row_stride(),
        );
        self.scroller.scroll_by(
            &mut self.host,
            delta,
            true,
            &self.config,
            self.clock,
            &mut self.frames,
        );
    }

    /// Center an element in the container, optionally animated.
    pub fn scroll_to_card(&mut self, element: ElementId, smooth: bool) {
        self.scroller.center_card(
            &mut self.host,
            element,
            smooth,
            &self.config,
            self.clock,
            &mut self.frames,
        );
    }

    /// Locate the active card's element and center it.
    pub fn scroll_to_active_card(&mut self) {
        let element = self
            .active
            .as_ref()
            .and_then(|id| self.renderer.element_for(id));
        if let Some(element) = element {
            self.scroll_to_card(element, true);
        }
    }

    // ── Shell queries ────────────────────────────────────────────────

    /// The measured size of the first rendered card, falling back to the
    /// configured dimensions.
    pub fn card_size(&self) -> Size {
        self.renderer
            .element_at(0)
            .and_then(|element| self.host.element_rect(element))
            .map(|rect| rect.size())
            .unwrap_or_else(|| Size::new(self.config.card_width, self.config.nominal_card_height()))
    }

    /// The source path behind a card element.
    pub fn file_from_card(&self, element: ElementId) -> Option<&str> {
        self.renderer
            .card_for_element(element)
            .map(|card| card.path.as_str())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Handle one input event from the host shell.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Wheel(wheel) => self.scroll_cards(wheel.delta_x, wheel.delta_y),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::FocusGained => self.focus_navigator(),
            InputEvent::FocusLost => self.blur_navigator(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = self.bindings.resolve(&key) else {
            return;
        };
        match action {
            NavAction::MoveFocus {
                row_delta,
                col_delta,
            } => {
                if !self.ensure_focused() {
                    return;
                }
                let columns = self.column_count();
                let total = self.renderer.card_count();
                let moved = self.navigator.move_focus(
                    row_delta,
                    col_delta,
                    columns,
                    total,
                    self.clock.now_ms,
                );
                if let Some(index) = moved {
                    self.center_index(index, true);
                }
            }
            NavAction::PageForward | NavAction::PageBackward => {
                if !self.ensure_focused() {
                    return;
                }
                let direction = if action == NavAction::PageForward { 1 } else { -1 };
                let step = self.page_step();
                let total = self.renderer.card_count();
                let moved = self
                    .navigator
                    .page_move(direction, step, total, self.clock.now_ms);
                if let Some(index) = moved {
                    self.center_index(index, true);
                }
            }
            NavAction::Home => {
                if !self.ensure_focused() {
                    return;
                }
                let total = self.renderer.card_count();
                if let Some(index) = self.navigator.home(total, self.clock.now_ms) {
                    self.center_index(index, true);
                }
            }
            NavAction::End => {
                if !self.ensure_focused() {
                    return;
                }
                let total = self.renderer.card_count();
                if let Some(index) = self.navigator.end(total, self.clock.now_ms) {
                    self.center_index(index, true);
                }
            }
            NavAction::OpenFocused => self.open_focused(),
            NavAction::Blur => self.blur_navigator(),
        }
    }

    /// The first navigation key acquires focus instead of moving it.
    /// Returns whether the navigator already held focus.
    fn ensure_focused(&mut self) -> bool {
        if self.navigator.is_focused() {
            return true;
        }
        self.focus_navigator();
        false
    }

    fn open_focused(&mut self) {
        let Some(index) = self.navigator.focused_index() else {
            return;
        };
        let Some(path) = self.renderer.cards().get(index).map(|card| card.path.clone()) else {
            return;
        };
        if let Err(error) = self.host.open_document(&path) {
            tracing::warn!(%error, %path, "failed to open document");
        }
    }

    // ── Geometry estimation ──────────────────────────────────────────

    fn column_count(&self) -> usize {
        layout::column_count(self.config.content_size().width, &self.config)
    }

    /// Cards per page: measured card extent against the container extent
    /// along the scroll axis, times the column count for grid-shaped
    /// layouts; falls back to the configured `cards_per_view`.
    fn page_step(&self) -> usize {
        let columns = self.column_count();
        let container_extent = self.config.axis.main(self.host.container_rect().size());
        let card_extent = self
            .renderer
            .element_at(0)
            .and_then(|element| self.host.element_rect(element))
            .map(|rect| self.config.axis.main(rect.size()));
        match card_extent {
            Some(extent) if extent > 0.0 && container_extent > 0.0 => {
                let fit = ((container_extent / (extent + self.config.gap)) as usize).max(1);
                if columns > 1 {
                    fit * columns
                } else {
                    fit
                }
            }
            _ => self.config.cards_per_view as usize,
        }
    }

    // ── Settings and resize ──────────────────────────────────────────

    /// Apply a new settings snapshot: re-derive the config and re-arrange
    /// from scratch. Rendered content is reused where ids and hashes are
    /// unchanged (position-only updates).
    pub fn apply_settings(&mut self, settings: PanelSettings) {
        self.settings = settings;
        self.config = LayoutConfig::derive(&self.settings, self.host.container_rect().size());
        self.renderer.invalidate_layout();
        self.rerender_current();
    }

    /// Record a container resize; the recomputation runs after the
    /// debounce window so notification storms collapse to one pass.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pending_resize = Some(Size::new(width, height));
        self.resize_debounce.touch(self.clock.now_ms);
    }

    fn rerender_current(&mut self) {
        if self.renderer.card_count() == 0 {
            return;
        }
        let cards = self.renderer.cards().to_vec();
        let request = RenderRequest::new(cards)
            .with_focused(self.focused_card_id())
            .with_active(self.active.clone());
        self.renderer
            .request_render(request, &self.config, &self.host, &mut self.frames);
    }

    // ── Frame pump ───────────────────────────────────────────────────

    /// Run one frame: dispatch scheduled work, then the debounced follow-ups.
    pub fn on_frame(&mut self, tick: FrameTick) {
        self.clock = tick;

        for (_, task) in self.frames.drain() {
            match task {
                PanelTask::RenderBatch => {
                    let outcome =
                        self.renderer
                            .process_batch(&mut self.host, &self.config, &mut self.frames);
                    if let RenderOutcome::Completed { total } = outcome {
                        // Structural change: clamp focus and re-apply the
                        // highlight without moving it.
                        self.navigator.revalidate(total);
                        self.apply_focus_flags();
                    }
                }
                PanelTask::Scroll => {
                    self.scroller
                        .on_frame(&mut self.host, &self.config, tick, &mut self.frames);
                }
            }
        }

        if self.navigator.poll_style(tick.now_ms) {
            self.apply_focus_flags();
        }

        if self.resize_debounce.poll(tick.now_ms) {
            if let Some(size) = self.pending_resize.take() {
                tracing::debug!(width = size.width, height = size.height, "applying debounced resize");
                self.config = LayoutConfig::derive(&self.settings, size);
                self.renderer.invalidate_layout();
                self.rerender_current();
            }
        }
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// Cancel all scheduled work and detach every rendered element,
    /// leaving the host container empty.
    pub fn dispose(&mut self) {
        self.scroller.cancel(&mut self.frames);
        self.renderer.dispose(&mut self.host, &mut self.frames);
        self.navigator.blur();
        self.resize_debounce.cancel();
        self.pending_resize = None;
        self.frames.clear();
    }
}
