//! Pilot: programmatic interaction with a headless panel.
//!
//! The `Pilot` wraps a [`CardPanel`] over a [`FakeHost`] and provides
//! methods to simulate user input, pump synthetic frames, and inspect the
//! host journal — no real UI or event loop involved.

use crate::card::{Card, CardId};
use crate::config::PanelSettings;
use crate::event::{InputEvent, Key, KeyEvent, Modifiers};
use crate::frame::FrameTick;
use crate::geometry::Size;
use crate::panel::CardPanel;

use super::host::FakeHost;

/// Synthetic frame duration (~60 fps).
const FRAME_MS: f64 = 16.0;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless panel driver for testing.
pub struct Pilot {
    panel: CardPanel<FakeHost>,
    frame: u64,
    now_ms: f64,
}

impl Pilot {
    /// Create a pilot over a container of the given pixel size, with
    /// default settings.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_settings(width, height, PanelSettings::new())
    }

    /// Create a pilot with explicit settings.
    pub fn with_settings(width: f32, height: f32, settings: PanelSettings) -> Self {
        let host = FakeHost::new(Size::new(width, height));
        Self {
            panel: CardPanel::new(host, settings),
            frame: 0,
            now_ms: 0.0,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render a card list and pump frames until the panel settles.
    pub fn render(&mut self, cards: Vec<Card>) {
        self.render_with(cards, None, None);
    }

    /// Render with focused/active highlight ids, settling afterwards.
    pub fn render_with(
        &mut self,
        cards: Vec<Card>,
        focused: Option<CardId>,
        active: Option<CardId>,
    ) {
        self.panel.render_cards(cards, focused, active);
        self.settle();
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.panel
            .handle_input(InputEvent::Key(KeyEvent::plain(key)));
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.panel
            .handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Simulate a container resize notification.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.panel.host_mut().set_container_size(Size::new(width, height));
        self.panel.handle_input(InputEvent::Resize { width, height });
    }

    // ── Frame pumping ────────────────────────────────────────────────

    /// Advance exactly `n` synthetic frames.
    pub fn step_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame += 1;
            self.now_ms += FRAME_MS;
            self.panel.on_frame(FrameTick::new(self.frame, self.now_ms));
        }
    }

    /// Pump frames until no cooperative work remains.
    ///
    /// Bounded; panics if the panel never settles (a scheduling bug).
    pub fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.panel.has_pending_work() {
                return;
            }
            self.step_frames(1);
        }
        panic!("panel did not settle within 1000 frames");
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The panel under test.
    pub fn panel(&self) -> &CardPanel<FakeHost> {
        &self.panel
    }

    /// Mutable access to the panel.
    pub fn panel_mut(&mut self) -> &mut CardPanel<FakeHost> {
        &mut self.panel
    }

    /// The fake host.
    pub fn host(&self) -> &FakeHost {
        self.panel.host()
    }

    /// Mutable access to the fake host.
    pub fn host_mut(&mut self) -> &mut FakeHost {
        self.panel.host_mut()
    }

    /// The focused card index, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.panel.focused_index()
    }

    /// The current synthetic timestamp.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_cards;

    #[test]
    fn render_settles_all_cards() {
        let mut pilot = Pilot::new(1000.0, 600.0);
        pilot.render(sample_cards(25));
        assert_eq!(pilot.panel().card_count(), 25);
        assert_eq!(pilot.host().element_count(), 25);
    }

    #[test]
    fn settle_on_idle_panel_is_a_noop() {
        let mut pilot = Pilot::new(1000.0, 600.0);
        pilot.settle();
        assert_eq!(pilot.host().element_count(), 0);
    }
}
