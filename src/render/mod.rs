//! Incremental rendering: reconciling a card list against live host elements.

pub mod renderer;

pub use renderer::{CardRenderer, RenderOutcome, RenderRequest};
