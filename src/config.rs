//! Panel settings and the derived layout configuration.
//!
//! [`PanelSettings`] is the read-only snapshot of user-facing settings the
//! embedding shell hands to the panel. [`LayoutConfig`] is derived from a
//! settings snapshot plus the current container size, with numeric
//! invariants clamped at construction so layout code never has to guard
//! against zero or negative inputs.

use crate::geometry::{Size, Spacing};

// ---------------------------------------------------------------------------
// LayoutKind
// ---------------------------------------------------------------------------

/// The active arrangement policy.
///
/// A tagged variant rather than a trait hierarchy so strategy dispatch is
/// exhaustive-checked at every `match` site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    /// Sequential stack along the scroll axis.
    List,
    /// Fixed row-major grid.
    #[default]
    Grid,
    /// Greedy shortest-column packing.
    Masonry,
}

// ---------------------------------------------------------------------------
// ScrollAxis
// ---------------------------------------------------------------------------

/// The axis the panel scrolls along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollAxis {
    Horizontal,
    #[default]
    Vertical,
}

impl ScrollAxis {
    /// The size component along this axis.
    #[inline]
    pub fn main(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Horizontal => size.width,
            ScrollAxis::Vertical => size.height,
        }
    }

    /// The size component across this axis.
    #[inline]
    pub fn cross(self, size: Size) -> f32 {
        match self {
            ScrollAxis::Horizontal => size.height,
            ScrollAxis::Vertical => size.width,
        }
    }
}

// ---------------------------------------------------------------------------
// CardHeight
// ---------------------------------------------------------------------------

/// Card main-axis extent: a fixed pixel value, or sized by content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardHeight {
    /// All cards share this fixed height.
    Fixed(f32),
    /// Height is determined by content after it lays out.
    Auto,
}

impl CardHeight {
    /// The fixed value, or `fallback` for auto-sized cards.
    #[inline]
    pub fn or(self, fallback: f32) -> f32 {
        match self {
            CardHeight::Fixed(h) => h,
            CardHeight::Auto => fallback,
        }
    }

    /// Whether this is the auto variant.
    #[inline]
    pub fn is_auto(self) -> bool {
        matches!(self, CardHeight::Auto)
    }
}

// ---------------------------------------------------------------------------
// PanelSettings
// ---------------------------------------------------------------------------

/// User-facing settings snapshot, owned by the embedding shell.
///
/// The panel reads this and never writes it back. Changes arrive as whole
/// new snapshots via `CardPanel::apply_settings`.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSettings {
    /// Active layout policy.
    pub layout: LayoutKind,
    /// Card cross-axis width in pixels.
    pub card_width: f32,
    /// Card main-axis extent.
    pub card_height: CardHeight,
    /// Gap between adjacent cards, both axes.
    pub gap: f32,
    /// Uniform container padding.
    pub padding: f32,
    /// Scroll direction.
    pub axis: ScrollAxis,
    /// Fixed grid column count; `None` derives from available width.
    pub grid_columns: Option<u32>,
    /// Target masonry column count.
    pub masonry_columns: u32,
    /// Fallback page size when no card can be measured.
    pub cards_per_view: u32,
    /// Whether scroll requests animate or jump.
    pub enable_scroll_animation: bool,
    /// Whether all cards are forced to the configured height.
    pub align_card_height: bool,
    /// Target frames per second for the runtime driver.
    pub fps: u32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            layout: LayoutKind::Grid,
            card_width: 300.0,
            card_height: CardHeight::Fixed(300.0),
            gap: 20.0,
            padding: 20.0,
            axis: ScrollAxis::Vertical,
            grid_columns: None,
            masonry_columns: 3,
            cards_per_view: 5,
            enable_scroll_animation: true,
            align_card_height: true,
            fps: 60,
        }
    }
}

impl PanelSettings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout policy (builder).
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    /// Set the card width (builder).
    pub fn with_card_width(mut self, width: f32) -> Self {
        self.card_width = width;
        self
    }

    /// Set the card height (builder).
    pub fn with_card_height(mut self, height: CardHeight) -> Self {
        self.card_height = height;
        self
    }

    /// Set the inter-card gap (builder).
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the container padding (builder).
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the scroll axis (builder).
    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Fix the grid column count (builder).
    pub fn with_grid_columns(mut self, columns: u32) -> Self {
        self.grid_columns = Some(columns);
        self
    }

    /// Set the masonry target column count (builder).
    pub fn with_masonry_columns(mut self, columns: u32) -> Self {
        self.masonry_columns = columns;
        self
    }

    /// Set the cards-per-view page fallback (builder).
    pub fn with_cards_per_view(mut self, cards: u32) -> Self {
        self.cards_per_view = cards;
        self
    }

    /// Enable or disable scroll animation (builder).
    pub fn with_scroll_animation(mut self, enabled: bool) -> Self {
        self.enable_scroll_animation = enabled;
        self
    }

    /// Enable or disable height alignment (builder).
    pub fn with_align_card_height(mut self, aligned: bool) -> Self {
        self.align_card_height = aligned;
        self
    }

    /// Set the driver fps (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }
}

// ---------------------------------------------------------------------------
// LayoutConfig
// ---------------------------------------------------------------------------

/// Numeric layout parameters derived from settings + container geometry.
///
/// Invariants hold after [`derive`](LayoutConfig::derive): `card_width >= 1`,
/// `gap >= 0`, `masonry_columns >= 1`, container dimensions `>= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub layout: LayoutKind,
    pub container: Size,
    pub card_width: f32,
    pub card_height: CardHeight,
    pub gap: f32,
    pub padding: Spacing,
    pub axis: ScrollAxis,
    pub grid_columns: Option<u32>,
    pub masonry_columns: u32,
    pub cards_per_view: u32,
    pub animate_scroll: bool,
    pub align_card_height: bool,
}

impl LayoutConfig {
    /// Derive a config from a settings snapshot and the container size.
    ///
    /// Out-of-range values are clamped rather than rejected; a clamp is
    /// logged at debug level since it usually means the host measured the
    /// container before it was attached.
    pub fn derive(settings: &PanelSettings, container: Size) -> Self {
        let card_width = if settings.card_width < 1.0 {
            tracing::debug!(card_width = settings.card_width, "clamping card width to 1");
            1.0
        } else {
            settings.card_width
        };
        let card_height = match settings.card_height {
            CardHeight::Fixed(h) if h < 1.0 => {
                tracing::debug!(card_height = h, "clamping card height to 1");
                CardHeight::Fixed(1.0)
            }
            other => other,
        };
        Self {
            layout: settings.layout,
            container: Size::new(container.width.max(0.0), container.height.max(0.0)),
            card_width,
            card_height,
            gap: settings.gap.max(0.0),
            padding: Spacing::uniform(settings.padding.max(0.0)),
            axis: settings.axis,
            grid_columns: settings.grid_columns,
            masonry_columns: settings.masonry_columns.max(1),
            cards_per_view: settings.cards_per_view.max(1),
            animate_scroll: settings.enable_scroll_animation,
            align_card_height: settings.align_card_height,
        }
    }

    /// The nominal card main-axis extent used when a real measurement is
    /// unavailable: the fixed height, or the card width for auto cards
    /// (a square estimate until content lays out).
    pub fn nominal_card_height(&self) -> f32 {
        self.card_height.or(self.card_width)
    }

    /// Column stride: card width plus one gap.
    #[inline]
    pub fn column_stride(&self) -> f32 {
        self.card_width + self.gap
    }

    /// Row stride: nominal card height plus one gap.
    #[inline]
    pub fn row_stride(&self) -> f32 {
        self.nominal_card_height() + self.gap
    }

    /// The container interior with padding removed.
    pub fn content_size(&self) -> Size {
        self.container.to_rect().shrink(self.padding).size()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
