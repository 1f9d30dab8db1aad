//! Headless testing framework: FakeHost, Pilot, card fixtures.
//!
//! Use [`FakeHost`] as a [`RenderHost`](crate::host::RenderHost) that
//! records every mutation in a plain-text journal, and [`Pilot`] to drive a
//! full [`CardPanel`](crate::panel::CardPanel) — key presses, frames,
//! renders — without a real UI.

pub mod host;
pub mod pilot;

pub use host::FakeHost;
pub use pilot::Pilot;

use crate::card::Card;

/// Build `n` deterministic sample cards (`card-0.md` .. `card-{n-1}.md`).
pub fn sample_cards(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| {
            Card::new(format!("card-{i}.md"), format!("Card {i}"))
                .with_body(format!("Body of card {i}"))
                .with_tag("sample")
        })
        .collect()
}
