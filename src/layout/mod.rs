//! Layout strategies: pure arrangement of cards into positions.
//!
//! [`arrange`] is a pure function of its inputs and the current
//! [`LayoutConfig`] — no state survives between calls, so repeated calls
//! with identical inputs yield identical output. The result is length- and
//! order-preserving: `positions[i]` corresponds to `cards[i]`.
//!
//! Positions are in content coordinates: `(0, 0)` is the top-left of the
//! padded container interior, before any scroll offset is applied.

pub mod grid;
pub mod list;
pub mod masonry;

use crate::card::{Card, CardId};
use crate::config::{CardHeight, LayoutConfig, LayoutKind};
use crate::geometry::{Rect, Size};

// ---------------------------------------------------------------------------
// CardPosition
// ---------------------------------------------------------------------------

/// Computed placement for one card within the current layout.
///
/// Produced fresh on every arrangement; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPosition {
    pub card_id: CardId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Fixed extent, or [`CardHeight::Auto`] for content-sized cards.
    pub height: CardHeight,
}

impl CardPosition {
    /// The position as a rect, resolving an auto height with `fallback`.
    pub fn rect(&self, fallback_height: f32) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height.or(fallback_height))
    }
}

// ---------------------------------------------------------------------------
// HeightHint
// ---------------------------------------------------------------------------

/// Per-card main-axis extents fed into masonry packing.
///
/// `Uniform` uses the configured nominal height for every card; `Measured`
/// carries real extents sampled from already-rendered elements, indexed in
/// card order.
#[derive(Debug, Clone, Copy)]
pub enum HeightHint<'a> {
    Uniform,
    Measured(&'a [f32]),
}

impl HeightHint<'_> {
    /// The extent for card `index`, falling back to `nominal` when no
    /// usable measurement exists.
    pub fn get(&self, index: usize, nominal: f32) -> f32 {
        match self {
            HeightHint::Uniform => nominal,
            HeightHint::Measured(heights) => match heights.get(index) {
                Some(&h) if h > 0.0 => h,
                _ => nominal,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Arrange `cards` within `available` space under the configured strategy.
pub fn arrange(
    cards: &[Card],
    available: Size,
    config: &LayoutConfig,
    heights: HeightHint<'_>,
) -> Vec<CardPosition> {
    if cards.is_empty() {
        return Vec::new();
    }
    match config.layout {
        LayoutKind::List => list::arrange(cards, available, config),
        LayoutKind::Grid => grid::arrange(cards, available, config),
        LayoutKind::Masonry => masonry::arrange(cards, available, config, heights),
    }
}

/// The column count keyboard navigation uses to map a 1-D focus index to
/// 2-D grid coordinates under the active strategy.
pub fn column_count(available_width: f32, config: &LayoutConfig) -> usize {
    match config.layout {
        LayoutKind::List => 1,
        LayoutKind::Grid => grid::column_count(available_width, config),
        LayoutKind::Masonry => masonry::column_count(available_width, config),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSettings;

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("card-{i}.md"), format!("Card {i}")))
            .collect()
    }

    fn config(kind: LayoutKind) -> LayoutConfig {
        let settings = PanelSettings::new().with_layout(kind).with_padding(0.0);
        LayoutConfig::derive(&settings, Size::new(1000.0, 600.0))
    }

    // ── Shared contract ──────────────────────────────────────────────

    #[test]
    fn empty_input_yields_empty_output() {
        for kind in [LayoutKind::List, LayoutKind::Grid, LayoutKind::Masonry] {
            let positions = arrange(&[], Size::new(1000.0, 600.0), &config(kind), HeightHint::Uniform);
            assert!(positions.is_empty());
        }
    }

    #[test]
    fn length_and_order_preserved() {
        let cards = cards(7);
        for kind in [LayoutKind::List, LayoutKind::Grid, LayoutKind::Masonry] {
            let positions =
                arrange(&cards, Size::new(1000.0, 600.0), &config(kind), HeightHint::Uniform);
            assert_eq!(positions.len(), cards.len());
            for (pos, card) in positions.iter().zip(&cards) {
                assert_eq!(pos.card_id, card.id);
            }
        }
    }

    #[test]
    fn arrange_is_idempotent() {
        let cards = cards(12);
        for kind in [LayoutKind::List, LayoutKind::Grid, LayoutKind::Masonry] {
            let cfg = config(kind);
            let a = arrange(&cards, Size::new(1000.0, 600.0), &cfg, HeightHint::Uniform);
            let b = arrange(&cards, Size::new(1000.0, 600.0), &cfg, HeightHint::Uniform);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn list_column_count_is_one() {
        assert_eq!(column_count(1000.0, &config(LayoutKind::List)), 1);
    }

    // ── HeightHint ───────────────────────────────────────────────────

    #[test]
    fn height_hint_fallbacks() {
        let measured = [120.0, 0.0, -5.0];
        let hint = HeightHint::Measured(&measured);
        assert_eq!(hint.get(0, 300.0), 120.0);
        assert_eq!(hint.get(1, 300.0), 300.0); // unmeasured
        assert_eq!(hint.get(2, 300.0), 300.0); // nonsense measurement
        assert_eq!(hint.get(9, 300.0), 300.0); // out of range
        assert_eq!(HeightHint::Uniform.get(0, 300.0), 300.0);
    }

    #[test]
    fn position_rect_resolves_auto_height() {
        let pos = CardPosition {
            card_id: CardId::new("a.md"),
            x: 10.0,
            y: 20.0,
            width: 300.0,
            height: CardHeight::Auto,
        };
        assert_eq!(pos.rect(150.0), Rect::new(10.0, 20.0, 300.0, 150.0));
    }
}
