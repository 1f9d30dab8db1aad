//! Linear list: sequential stacking along the scroll axis.

use crate::card::Card;
use crate::config::{CardHeight, LayoutConfig, ScrollAxis};
use crate::geometry::Size;

use super::CardPosition;

/// Stack cards along the scroll axis with one gap between neighbors.
///
/// The cross axis fills the container. For a vertical list the main-axis
/// extent is the fixed card height, or [`CardHeight::Auto`] when height
/// alignment is disabled; stacking still advances by the nominal height so
/// positions stay deterministic before content is measured.
pub fn arrange(cards: &[Card], available: Size, config: &LayoutConfig) -> Vec<CardPosition> {
    match config.axis {
        ScrollAxis::Vertical => arrange_vertical(cards, available, config),
        ScrollAxis::Horizontal => arrange_horizontal(cards, available, config),
    }
}

fn arrange_vertical(cards: &[Card], available: Size, config: &LayoutConfig) -> Vec<CardPosition> {
    let width = available.width.max(config.card_width);
    let height = if config.align_card_height {
        CardHeight::Fixed(config.nominal_card_height())
    } else {
        CardHeight::Auto
    };
    let advance = config.nominal_card_height() + config.gap;

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| CardPosition {
            card_id: card.id.clone(),
            x: 0.0,
            y: i as f32 * advance,
            width,
            height,
        })
        .collect()
}

fn arrange_horizontal(cards: &[Card], available: Size, config: &LayoutConfig) -> Vec<CardPosition> {
    let height = CardHeight::Fixed(available.height.max(1.0));
    let advance = config.column_stride();

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| CardPosition {
            card_id: card.id.clone(),
            x: i as f32 * advance,
            y: 0.0,
            width: config.card_width,
            height,
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
