//! The card renderer: minimal host mutations per data change.
//!
//! [`CardRenderer`] owns the map from card id to live host element and
//! reconciles it against each new card list: unchanged cards are only
//! repositioned, changed cards get their content refilled, new cards are
//! created, and ids missing from the new list are detached once the pass
//! completes. Work is chunked into batches spread across frames through the
//! shared [`FrameScheduler`]; a request arriving mid-flight is coalesced
//! into a single trailing run so old and new card sets never interleave.

use std::collections::{HashMap, HashSet};

use crate::card::{Card, CardId};
use crate::config::{LayoutConfig, LayoutKind};
use crate::frame::{FrameScheduler, TaskHandle};
use crate::host::{ElementId, RenderHost, StateFlag};
use crate::layout::{self, CardPosition, HeightHint};
use crate::panel::PanelTask;

/// How many cards one frame callback processes.
const DEFAULT_BATCH_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// RenderRequest
// ---------------------------------------------------------------------------

/// One render request: the card list plus the ids to highlight.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub cards: Vec<Card>,
    pub focused: Option<CardId>,
    pub active: Option<CardId>,
}

impl RenderRequest {
    /// Request with no highlight state.
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            focused: None,
            active: None,
        }
    }

    /// Set the focused card id (builder).
    pub fn with_focused(mut self, id: Option<CardId>) -> Self {
        self.focused = id;
        self
    }

    /// Set the active card id (builder).
    pub fn with_active(mut self, id: Option<CardId>) -> Self {
        self.active = id;
        self
    }
}

// ---------------------------------------------------------------------------
// CardRenderer
// ---------------------------------------------------------------------------

/// A card already realized as a host element.
#[derive(Debug, Clone, Copy)]
struct RenderedCard {
    element: ElementId,
    hash: u64,
}

/// A reconciliation pass in flight.
#[derive(Debug)]
struct PendingRender {
    request: RenderRequest,
    positions: Vec<CardPosition>,
    cursor: usize,
}

/// Result of one batch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing was in flight.
    Idle,
    /// More batches remain; another frame callback is scheduled.
    InProgress,
    /// The pass completed; `total` is the rendered card count.
    Completed { total: usize },
}

/// Owns the id -> element map and performs incremental reconciliation.
#[derive(Debug)]
pub struct CardRenderer {
    rendered: HashMap<CardId, RenderedCard>,
    /// Rendered card ids in display order, as of the last completed pass.
    order: Vec<CardId>,
    /// Geometry from the last arrangement, keyed by id for reuse.
    cached_positions: HashMap<CardId, CardPosition>,
    /// The card set of the last completed pass.
    cards: Vec<Card>,
    pending: Option<PendingRender>,
    /// Trailing coalesced request; replaced, never queued deeper.
    queued: Option<RenderRequest>,
    batch_size: usize,
    task: Option<TaskHandle>,
}

impl CardRenderer {
    /// Create a renderer with the default batch size.
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH_SIZE)
    }

    /// Create a renderer processing `batch_size` cards per frame.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            rendered: HashMap::new(),
            order: Vec::new(),
            cached_positions: HashMap::new(),
            cards: Vec::new(),
            pending: None,
            queued: None,
            batch_size: batch_size.max(1),
            task: None,
        }
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Start (or queue) a reconciliation pass for `request`.
    ///
    /// If a pass is mid-flight the request is stored as the single trailing
    /// run, superseding any previously queued one; intermediate stale
    /// requests are never rendered.
    pub fn request_render<H: RenderHost>(
        &mut self,
        request: RenderRequest,
        config: &LayoutConfig,
        host: &H,
        frames: &mut FrameScheduler<PanelTask>,
    ) {
        if self.pending.is_some() {
            tracing::debug!(cards = request.cards.len(), "coalescing render behind in-flight pass");
            self.queued = Some(request);
            return;
        }
        self.begin(request, config, host, frames);
    }

    fn begin<H: RenderHost>(
        &mut self,
        request: RenderRequest,
        config: &LayoutConfig,
        host: &H,
        frames: &mut FrameScheduler<PanelTask>,
    ) {
        let positions = match self.reusable_positions(&request.cards) {
            Some(positions) => {
                tracing::debug!("card set unchanged, reusing cached geometry");
                positions
            }
            None => {
                let measured = self.measured_heights(&request.cards, config, host);
                let hint = match &measured {
                    Some(heights) => HeightHint::Measured(heights),
                    None => HeightHint::Uniform,
                };
                layout::arrange(&request.cards, config.content_size(), config, hint)
            }
        };
        self.pending = Some(PendingRender {
            request,
            positions,
            cursor: 0,
        });
        self.ensure_scheduled(frames);
    }

    /// Cached positions re-keyed to the request order, or `None` when the
    /// id set changed (count differs or an id was never rendered) and a
    /// full recalculation is required.
    fn reusable_positions(&self, cards: &[Card]) -> Option<Vec<CardPosition>> {
        if cards.len() != self.order.len() {
            return None;
        }
        cards
            .iter()
            .map(|card| self.cached_positions.get(&card.id).cloned())
            .collect()
    }

    /// Real element extents for masonry packing over auto-height cards.
    fn measured_heights<H: RenderHost>(
        &self,
        cards: &[Card],
        config: &LayoutConfig,
        host: &H,
    ) -> Option<Vec<f32>> {
        if config.layout != LayoutKind::Masonry || config.align_card_height {
            return None;
        }
        Some(
            cards
                .iter()
                .map(|card| {
                    self.rendered
                        .get(&card.id)
                        .and_then(|rc| host.element_rect(rc.element))
                        .map_or(0.0, |rect| rect.height)
                })
                .collect(),
        )
    }

    fn ensure_scheduled(&mut self, frames: &mut FrameScheduler<PanelTask>) {
        let live = self.task.is_some_and(|task| frames.is_scheduled(task));
        if !live {
            self.task = Some(frames.schedule(PanelTask::RenderBatch));
        }
    }

    // ── Batch processing ─────────────────────────────────────────────

    /// Process one batch of the in-flight pass. Called by the panel when
    /// the scheduler delivers a `RenderBatch` task.
    pub fn process_batch<H: RenderHost>(
        &mut self,
        host: &mut H,
        config: &LayoutConfig,
        frames: &mut FrameScheduler<PanelTask>,
    ) -> RenderOutcome {
        let Some(mut pending) = self.pending.take() else {
            self.task = None;
            return RenderOutcome::Idle;
        };

        let end = (pending.cursor + self.batch_size).min(pending.request.cards.len());
        for i in pending.cursor..end {
            let card = &pending.request.cards[i];
            if card.id.is_empty() {
                tracing::warn!(index = i, "skipping card with empty id");
                continue;
            }
            self.render_one(host, card, &pending.positions[i]);
        }
        pending.cursor = end;

        if pending.cursor < pending.request.cards.len() {
            self.pending = Some(pending);
            self.ensure_scheduled(frames);
            return RenderOutcome::InProgress;
        }

        let total = self.finish(host, pending);
        if let Some(next) = self.queued.take() {
            self.begin(next, config, host, frames);
        } else {
            self.task = None;
        }
        RenderOutcome::Completed { total }
    }

    /// Reconcile a single card against its element.
    fn render_one<H: RenderHost>(&mut self, host: &mut H, card: &Card, position: &CardPosition) {
        let hash = card.content_hash();
        let existing = self.rendered.get(&card.id).map(|rc| (rc.element, rc.hash));
        match existing {
            // Unchanged content: reposition only, leave the subtree alone.
            Some((element, old_hash)) if old_hash == hash && host.is_attached(element) => {
                host.apply_position(element, position);
            }
            // Changed content on a live element: refill in place.
            Some((element, _)) if host.is_attached(element) => {
                Self::fill_content(host, element, card);
                host.apply_position(element, position);
                self.rendered
                    .insert(card.id.clone(), RenderedCard { element, hash });
            }
            // New card, or the host lost the element from under us.
            _ => {
                let element = host.create_element(&card.id);
                Self::fill_content(host, element, card);
                host.apply_position(element, position);
                self.rendered
                    .insert(card.id.clone(), RenderedCard { element, hash });
            }
        }
    }

    /// Rich content with plain-text fallback; one bad card never aborts
    /// the batch.
    fn fill_content<H: RenderHost>(host: &mut H, element: ElementId, card: &Card) {
        if let Err(error) = host.render_rich(element, card) {
            tracing::warn!(card = %card.id, %error, "rich content failed, falling back to plain text");
            host.render_plain(element, card);
        }
    }

    /// Complete a pass: purge orphans, cache geometry, apply flags.
    fn finish<H: RenderHost>(&mut self, host: &mut H, pending: PendingRender) -> usize {
        let PendingRender {
            request, positions, ..
        } = pending;

        let live: HashSet<&CardId> = request.cards.iter().map(|card| &card.id).collect();
        let stale: Vec<CardId> = self
            .rendered
            .keys()
            .filter(|id| !live.contains(id))
            .cloned()
            .collect();
        for id in &stale {
            if let Some(rc) = self.rendered.remove(id) {
                host.remove_element(rc.element);
            }
        }
        if !stale.is_empty() {
            tracing::debug!(removed = stale.len(), "purged stale card elements");
        }

        self.cached_positions = positions
            .into_iter()
            .map(|position| (position.card_id.clone(), position))
            .collect();
        self.order = request.cards.iter().map(|card| card.id.clone()).collect();
        self.apply_state_flags(host, request.focused.as_ref(), request.active.as_ref());
        self.cards = request.cards;
        self.order.len()
    }

    // ── State flags ──────────────────────────────────────────────────

    /// Re-derive the active/focused flags on every rendered element from
    /// plain id comparison. Idempotent.
    pub fn apply_state_flags<H: RenderHost>(
        &self,
        host: &mut H,
        focused: Option<&CardId>,
        active: Option<&CardId>,
    ) {
        for (id, rc) in &self.rendered {
            host.set_flag(rc.element, StateFlag::Focused, Some(id) == focused);
            host.set_flag(rc.element, StateFlag::Active, Some(id) == active);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Number of cards in the last completed pass.
    pub fn card_count(&self) -> usize {
        self.order.len()
    }

    /// The card id at `index` in display order.
    pub fn card_id_at(&self, index: usize) -> Option<&CardId> {
        self.order.get(index)
    }

    /// The display index of `id`.
    pub fn index_of(&self, id: &CardId) -> Option<usize> {
        self.order.iter().position(|other| other == id)
    }

    /// The live element for `id`, if rendered.
    pub fn element_for(&self, id: &CardId) -> Option<ElementId> {
        self.rendered.get(id).map(|rc| rc.element)
    }

    /// The live element at display `index`.
    pub fn element_at(&self, index: usize) -> Option<ElementId> {
        self.card_id_at(index).and_then(|id| self.element_for(id))
    }

    /// The card behind a host element, for reverse lookups from the shell.
    pub fn card_for_element(&self, element: ElementId) -> Option<&Card> {
        let id = self
            .rendered
            .iter()
            .find(|(_, rc)| rc.element == element)
            .map(|(id, _)| id)?;
        self.cards.iter().find(|card| &card.id == id)
    }

    /// The card set of the last completed pass.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether a pass is currently mid-flight.
    pub fn is_render_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop cached geometry so the next request recomputes from scratch.
    /// Called on any settings or container-size change.
    pub fn invalidate_layout(&mut self) {
        self.cached_positions.clear();
    }

    /// Cancel in-flight work and detach every rendered element.
    pub fn dispose<H: RenderHost>(
        &mut self,
        host: &mut H,
        frames: &mut FrameScheduler<PanelTask>,
    ) {
        if let Some(task) = self.task.take() {
            frames.cancel(task);
        }
        self.pending = None;
        self.queued = None;
        for (_, rc) in self.rendered.drain() {
            host.remove_element(rc.element);
        }
        self.order.clear();
        self.cached_positions.clear();
        self.cards.clear();
    }
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
