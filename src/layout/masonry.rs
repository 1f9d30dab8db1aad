//! Masonry: greedy shortest-column packing.
//!
//! Each card goes into the currently shortest column (ties break toward the
//! lowest column index). This is the standard greedy approximation to
//! multi-way bin balancing: O(n * columns), and for roughly uniform card
//! heights it keeps the final columns within one card height of each other.

use crate::card::Card;
use crate::config::{CardHeight, LayoutConfig};
use crate::geometry::Size;

use super::{grid, CardPosition, HeightHint};

/// The masonry column count: the configured target, clamped to how many
/// card widths actually fit (minimum 1).
pub fn column_count(available_width: f32, config: &LayoutConfig) -> usize {
    let fit = grid::derived_columns(available_width, config);
    (config.masonry_columns as usize).clamp(1, fit.max(1))
}

/// Place cards by the shortest-column rule.
///
/// Column height accumulators start at zero; a placed card adds its extent
/// plus one gap to its column. Packing order is sensitive to the total card
/// count, so a settings change always recomputes from scratch — there is no
/// incremental update path.
pub fn arrange(
    cards: &[Card],
    available: Size,
    config: &LayoutConfig,
    heights: HeightHint<'_>,
) -> Vec<CardPosition> {
    let columns = column_count(available.width, config);
    let stride_x = config.column_stride();
    let nominal = config.nominal_card_height();
    let mut accumulators = vec![0.0f32; columns];

    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let col = shortest_column(&accumulators);
            let height = heights.get(i, nominal);
            let position = CardPosition {
                card_id: card.id.clone(),
                x: col as f32 * stride_x,
                y: accumulators[col],
                width: config.card_width,
                height: CardHeight::Fixed(height),
            };
            accumulators[col] += height + config.gap;
            position
        })
        .collect()
}

/// Index of the shortest accumulator. Strict `<` keeps the lowest index on
/// ties.
fn shortest_column(accumulators: &[f32]) -> usize {
    let mut best = 0;
    for (i, &height) in accumulators.iter().enumerate().skip(1) {
        if height < accumulators[best] {
            best = i;
        }
    }
    best
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutKind, PanelSettings};

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("card-{i}.md"), format!("Card {i}")))
            .collect()
    }

    fn config(columns: u32) -> LayoutConfig {
        let settings = PanelSettings::new()
            .with_layout(LayoutKind::Masonry)
            .with_masonry_columns(columns)
            .with_padding(0.0)
            .with_gap(10.0);
        LayoutConfig::derive(&settings, Size::new(1000.0, 600.0))
    }

    fn column_of(pos: &CardPosition, stride: f32) -> usize {
        (pos.x / stride) as usize
    }

    // ── shortest_column ──────────────────────────────────────────────

    #[test]
    fn ties_break_toward_lowest_index() {
        assert_eq!(shortest_column(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(shortest_column(&[5.0, 5.0, 2.0]), 2);
        assert_eq!(shortest_column(&[5.0, 2.0, 2.0]), 1);
    }

    // ── arrange ──────────────────────────────────────────────────────

    #[test]
    fn varied_heights_follow_shortest_column_rule() {
        let cards = cards(5);
        let heights = [100.0, 100.0, 100.0, 50.0, 50.0];
        let cfg = config(3);
        let positions = arrange(
            &cards,
            Size::new(1000.0, 600.0),
            &cfg,
            HeightHint::Measured(&heights),
        );

        let stride = cfg.column_stride();
        let cols: Vec<usize> = positions.iter().map(|p| column_of(p, stride)).collect();
        assert_eq!(cols, vec![0, 1, 2, 0, 1]);

        // Cards 3 and 4 stack below cards 0 and 1 (height 100 + gap 10).
        assert_eq!(positions[3].y, 110.0);
        assert_eq!(positions[4].y, 110.0);

        // Final accumulators: col0 = col1 = 100+10+50+10 = 170, col2 = 110.
        // Tallest minus shortest is 60, under one card height.
        let spread = 170.0f32 - 110.0;
        assert!(spread < 100.0);
    }

    #[test]
    fn uniform_heights_divide_evenly() {
        let cfg = config(3);
        let positions = arrange(&cards(18), Size::new(1000.0, 600.0), &cfg, HeightHint::Uniform);
        let spread = accumulator_spread(&positions, &cfg, 3);
        assert_eq!(spread, 0.0);
    }

    #[test]
    fn varied_heights_stay_within_one_tallest_card() {
        // Heights cycle through 60..=180; the greedy rule bounds the final
        // spread by the tallest single card plus one gap.
        let heights: Vec<f32> = (0..23).map(|i| 60.0 + 10.0 * (i % 13) as f32).collect();
        let tallest = heights.iter().cloned().fold(f32::MIN, f32::max);
        let cfg = config(3);
        let positions = arrange(
            &cards(23),
            Size::new(1000.0, 600.0),
            &cfg,
            HeightHint::Measured(&heights),
        );
        let spread = accumulator_spread(&positions, &cfg, 3);
        assert!(
            spread <= tallest + cfg.gap,
            "spread {spread} exceeds tallest card {tallest} + gap"
        );
    }

    /// Rebuild the final accumulators from the output and return
    /// tallest - shortest.
    fn accumulator_spread(positions: &[CardPosition], cfg: &LayoutConfig, columns: usize) -> f32 {
        let stride = cfg.column_stride();
        let mut accumulators = vec![0.0f32; columns];
        for pos in positions {
            let col = column_of(pos, stride);
            let bottom = pos.y + pos.height.or(0.0) + cfg.gap;
            accumulators[col] = accumulators[col].max(bottom);
        }
        let max = accumulators.iter().cloned().fold(f32::MIN, f32::max);
        let min = accumulators.iter().cloned().fold(f32::MAX, f32::min);
        max - min
    }

    #[test]
    fn target_columns_clamped_to_fit() {
        // Width 650 fits floor(650/310) = 2 card strides.
        assert_eq!(column_count(650.0, &config(3)), 2);
        // Narrower than one card: a single column.
        assert_eq!(column_count(100.0, &config(3)), 1);
        // Wide enough: the target wins.
        assert_eq!(column_count(1000.0, &config(3)), 3);
    }

    #[test]
    fn filler_cards_use_nominal_height() {
        let cfg = config(2);
        let positions = arrange(&cards(3), Size::new(1000.0, 600.0), &cfg, HeightHint::Uniform);
        // Nominal height 300 + gap 10: third card lands below the first.
        assert_eq!(positions[2].x, positions[0].x);
        assert_eq!(positions[2].y, 310.0);
    }
}
