//! Tokio-driven frame loop.
//!
//! [`run_panel`] owns a [`CardPanel`] for the lifetime of the loop: it
//! pumps [`on_frame`](CardPanel::on_frame) at the settings' target fps
//! from a tokio interval and feeds the panel input events from an mpsc
//! channel. The loop ends when the shell drops the sender; the panel is
//! disposed and handed back for inspection.
//!
//! Tests bypass this entirely and pump frames by hand through
//! [`testing::Pilot`](crate::testing::Pilot).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::event::InputEvent;
use crate::frame::FrameTick;
use crate::host::RenderHost;
use crate::panel::CardPanel;

/// Drive `panel` until `events` closes, then dispose it and return it.
pub async fn run_panel<H: RenderHost>(
    mut panel: CardPanel<H>,
    mut events: mpsc::Receiver<InputEvent>,
) -> CardPanel<H> {
    let fps = panel.settings().fps.max(1);
    let mut interval = time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let start = time::Instant::now();
    let mut frame = 0u64;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                frame += 1;
                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                panel.on_frame(FrameTick::new(frame, now_ms));
            }
            event = events.recv() => {
                match event {
                    Some(event) => panel.handle_input(event),
                    None => break,
                }
            }
        }
    }

    tracing::debug!(frames = frame, "frame loop stopped, disposing panel");
    panel.dispose();
    panel
}

// ===========================================================================
// Tests
// ===========================================================================
