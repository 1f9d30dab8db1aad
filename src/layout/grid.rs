//! Fixed grid: row-major placement at uniform strides.

use crate::card::Card;
use crate::config::{CardHeight, LayoutConfig};
use crate::geometry::Size;

use super::CardPosition;

/// The grid column count: the configured override, or
/// `floor(available_width / (card_width + gap))`, minimum 1.
pub fn column_count(available_width: f32, config: &LayoutConfig) -> usize {
    if let Some(n) = config.grid_columns {
        return (n as usize).max(1);
    }
    derived_columns(available_width, config)
}

/// Column count derived from available width. A container narrower than a
/// single card still gets one column.
pub(super) fn derived_columns(available_width: f32, config: &LayoutConfig) -> usize {
    let stride = config.column_stride();
    if available_width < config.card_width || stride <= 0.0 {
        tracing::debug!(available_width, "container narrower than one card, using 1 column");
        return 1;
    }
    ((available_width / stride) as usize).max(1)
}

/// Place cards row-major: `col = i % columns`, `row = i / columns`.
pub fn arrange(cards: &[Card], available: Size, config: &LayoutConfig) -> Vec<CardPosition> {
    let columns = column_count(available.width, config);
    let stride_x = config.column_stride();
    let stride_y = config.row_stride();
    let height = config.nominal_card_height();

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let col = i % columns;
            let row = i / columns;
            CardPosition {
                card_id: card.id.clone(),
                x: col as f32 * stride_x,
                y: row as f32 * stride_y,
                width: config.card_width,
                height: CardHeight::Fixed(height),
            }
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
