//! Scroll control: centering, smooth animation, convergence.
//!
//! [`Scroller`] is the imperative scroll primitive shared by keyboard
//! navigation and "jump to active card" requests. Centering aligns an
//! element's midpoint with the container's visible midpoint along the
//! scroll axis; with animation enabled the offset interpolates over a fixed
//! duration with an ease-in-out cubic. When cards can resize after first
//! paint (auto heights), a convergence loop re-samples the element on
//! successive frames until the computed offset stops moving, bounded by a
//! wall-clock budget.

use crate::config::{LayoutConfig, ScrollAxis};
use crate::frame::{FrameScheduler, FrameTick, TaskHandle};
use crate::geometry::Point;
use crate::host::{ElementId, RenderHost};
use crate::panel::PanelTask;

/// Smooth-scroll duration.
const SCROLL_ANIMATION_MS: f64 = 300.0;
/// Offsets within this many pixels count as "unchanged" for convergence.
const CONVERGENCE_EPSILON: f32 = 0.5;
/// Consecutive stable frames required before convergence stops.
const CONVERGENCE_STABLE_FRAMES: u32 = 3;
/// Hard wall-clock bound on chasing a still-resizing element.
const CONVERGENCE_BUDGET_MS: f64 = 2000.0;

// ---------------------------------------------------------------------------
// Scroller
// ---------------------------------------------------------------------------

/// An in-flight smooth scroll.
#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: Point,
    to: Point,
    start_ms: f64,
}

/// A centering pass still chasing an unstable element.
#[derive(Debug, Clone, Copy)]
struct Convergence {
    element: ElementId,
    stable: u32,
    started_ms: f64,
}

/// Imperative scroll/centering controller.
#[derive(Debug, Default)]
pub struct Scroller {
    animation: Option<ScrollAnimation>,
    convergence: Option<Convergence>,
    task: Option<TaskHandle>,
}

impl Scroller {
    /// Create an idle scroller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a smooth scroll or convergence pass is in flight.
    pub fn is_in_motion(&self) -> bool {
        self.animation.is_some() || self.convergence.is_some()
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Center `element` in the container's visible area.
    ///
    /// Any in-flight animation is canceled before the new trajectory is
    /// computed, so rapid repeats never produce competing motions. A
    /// detached element is a silent no-op. With height alignment disabled
    /// a convergence pass follows the primary centering.
    pub fn center_card<H: RenderHost>(
        &mut self,
        host: &mut H,
        element: ElementId,
        animate: bool,
        config: &LayoutConfig,
        tick: FrameTick,
        frames: &mut FrameScheduler<PanelTask>,
    ) {
        self.cancel(frames);
        let Some(target) = centered_offset(host, element, config) else {
            return;
        };
        if animate && config.animate_scroll {
            self.animation = Some(ScrollAnimation {
                from: host.scroll_offset(),
                to: target,
                start_ms: tick.now_ms,
            });
        } else {
            host.set_scroll_offset(target);
        }
        if !config.align_card_height {
            self.convergence = Some(Convergence {
                element,
                stable: 0,
                started_ms: tick.now_ms,
            });
        }
        if self.is_in_motion() {
            self.ensure_scheduled(frames);
        }
    }

    /// Scroll by a raw pixel delta. The host clamps to its own range.
    pub fn scroll_by<H: RenderHost>(
        &mut self,
        host: &mut H,
        delta: Point,
        animate: bool,
        config: &LayoutConfig,
        tick: FrameTick,
        frames: &mut FrameScheduler<PanelTask>,
    ) {
        self.cancel(frames);
        let target = host.scroll_offset() + delta;
        if animate && config.animate_scroll {
            self.animation = Some(ScrollAnimation {
                from: host.scroll_offset(),
                to: target,
                start_ms: tick.now_ms,
            });
            self.ensure_scheduled(frames);
        } else {
            host.set_scroll_offset(target);
        }
    }

    /// Cancel all in-flight motion.
    pub fn cancel(&mut self, frames: &mut FrameScheduler<PanelTask>) {
        self.animation = None;
        self.convergence = None;
        if let Some(task) = self.task.take() {
            frames.cancel(task);
        }
    }

    // ── Frame stepping ───────────────────────────────────────────────

    /// Advance the animation and/or convergence pass by one frame.
    /// Returns whether motion remains in flight.
    pub fn on_frame<H: RenderHost>(
        &mut self,
        host: &mut H,
        config: &LayoutConfig,
        tick: FrameTick,
        frames: &mut FrameScheduler<PanelTask>,
    ) -> bool {
        if let Some(animation) = self.animation {
            let t = ((tick.now_ms - animation.start_ms) / SCROLL_ANIMATION_MS).clamp(0.0, 1.0);
            host.set_scroll_offset(animation.from.lerp(animation.to, ease_in_out_cubic(t as f32)));
            if t >= 1.0 {
                self.animation = None;
            }
        } else if let Some(mut convergence) = self.convergence.take() {
            self.convergence = Self::step_convergence(host, config, tick, &mut convergence);
        }

        let in_motion = self.is_in_motion();
        if in_motion {
            self.ensure_scheduled(frames);
        } else {
            self.task = None;
        }
        in_motion
    }

    /// One convergence sample: recompute the centering offset and either
    /// apply the correction or count a stable frame.
    fn step_convergence<H: RenderHost>(
        host: &mut H,
        config: &LayoutConfig,
        tick: FrameTick,
        convergence: &mut Convergence,
    ) -> Option<Convergence> {
        if tick.now_ms - convergence.started_ms >= CONVERGENCE_BUDGET_MS {
            tracing::debug!("centering convergence hit its time budget");
            return None;
        }
        let target = centered_offset(host, convergence.element, config)?;
        let current = host.scroll_offset();
        let axis = config.axis;
        let drift = match axis {
            ScrollAxis::Horizontal => (target.x - current.x).abs(),
            ScrollAxis::Vertical => (target.y - current.y).abs(),
        };
        if drift <= CONVERGENCE_EPSILON {
            convergence.stable += 1;
            if convergence.stable >= CONVERGENCE_STABLE_FRAMES {
                return None;
            }
        } else {
            convergence.stable = 0;
            host.set_scroll_offset(target);
        }
        Some(*convergence)
    }

    fn ensure_scheduled(&mut self, frames: &mut FrameScheduler<PanelTask>) {
        let live = self.task.is_some_and(|task| frames.is_scheduled(task));
        if !live {
            self.task = Some(frames.schedule(PanelTask::Scroll));
        }
    }
}

// ---------------------------------------------------------------------------
// Centering math
// ---------------------------------------------------------------------------

/// The scroll offset that aligns the element's center with the visible
/// area's center along the scroll axis, or `None` for a detached element.
fn centered_offset<H: RenderHost>(
    host: &H,
    element: ElementId,
    config: &LayoutConfig,
) -> Option<Point> {
    let rect = host.element_rect(element)?;
    let visible = host.container_rect().shrink(config.padding);
    let delta = match config.axis {
        ScrollAxis::Horizontal => rect.center().x - visible.center().x,
        ScrollAxis::Vertical => rect.center().y - visible.center().y,
    };
    let mut target = host.scroll_offset();
    match config.axis {
        ScrollAxis::Horizontal => target.x += delta,
        ScrollAxis::Vertical => target.y += delta,
    }
    Some(target)
}

/// Ease-in-out cubic: accelerates to the midpoint, decelerates after.
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

// ===========================================================================
// Tests
// ===========================================================================
