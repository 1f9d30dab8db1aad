//! Frame scheduling: the single cooperative-work abstraction.
//!
//! Everything in cardwall that spreads work across frames — batched
//! rendering, scroll animation, convergence sampling — goes through one
//! [`FrameScheduler`] so batching and cancellation semantics are uniform
//! and testable without a real event loop. The production driver pumps
//! frames from a tokio interval; tests pump them by hand.
//!
//! The scheduler is payload-generic: it knows nothing about what a task
//! means. The owner drains due payloads each frame and dispatches them
//! with whatever mutable state it likes, which keeps scheduling free of
//! borrow entanglements with the components it serves.

// ---------------------------------------------------------------------------
// FrameTick
// ---------------------------------------------------------------------------

/// One frame of the cooperative loop: a monotonically increasing frame
/// counter plus a millisecond timestamp supplied by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Frame counter, starts at 0 and increments by 1 per frame.
    pub frame: u64,
    /// Milliseconds since the driver started. Synthetic in tests.
    pub now_ms: f64,
}

impl FrameTick {
    /// Create a tick.
    pub const fn new(frame: u64, now_ms: f64) -> Self {
        Self { frame, now_ms }
    }
}

// ---------------------------------------------------------------------------
// TaskHandle
// ---------------------------------------------------------------------------

/// Identifies one scheduled task for cancellation.
///
/// Handles are never reused, so a stale handle cancels nothing instead of
/// cancelling someone else's task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

// ---------------------------------------------------------------------------
// FrameScheduler
// ---------------------------------------------------------------------------

/// Queue of payloads to run on the next frame.
///
/// [`schedule`](FrameScheduler::schedule) enqueues a payload for the next
/// [`drain`](FrameScheduler::drain); payloads scheduled while a drain's
/// results are being processed land in the frame after. Every payload is
/// cancelable until drained.
#[derive(Debug)]
pub struct FrameScheduler<T> {
    next_id: u64,
    tasks: Vec<(TaskHandle, T)>,
}

impl<T> FrameScheduler<T> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Schedule `payload` for the next frame. Returns a cancellation handle.
    pub fn schedule(&mut self, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, payload));
        handle
    }

    /// Cancel a scheduled task. Returns `true` if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    /// Whether the handle refers to a still-pending task.
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|(h, _)| *h == handle)
    }

    /// Take every pending payload for this frame.
    ///
    /// Payloads scheduled by the caller while processing the returned batch
    /// accumulate for the next frame.
    pub fn drain(&mut self) -> Vec<(TaskHandle, T)> {
        std::mem::take(&mut self.tasks)
    }

    /// Drop all pending tasks. Used on teardown.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Trailing-edge debouncer over frame timestamps.
///
/// [`touch`](Debouncer::touch) arms (or re-arms) the deadline; the first
/// [`poll`](Debouncer::poll) at or past the deadline fires exactly once.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    /// Create a debouncer with the given trailing delay.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Arm the debouncer: the deadline moves to `now + delay`.
    pub fn touch(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Returns `true` once, when a deadline has passed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── FrameScheduler ───────────────────────────────────────────────

    #[test]
    fn schedule_and_drain() {
        let mut sched = FrameScheduler::new();
        sched.schedule("a");
        sched.schedule("b");
        let batch: Vec<&str> = sched.drain().into_iter().map(|(_, t)| t).collect();
        assert_eq!(batch, vec!["a", "b"]);
        assert!(sched.is_empty());
    }

    #[test]
    fn cancel_removes_pending_task() {
        let mut sched = FrameScheduler::new();
        let a = sched.schedule("a");
        let b = sched.schedule("b");
        assert!(sched.cancel(a));
        assert!(!sched.cancel(a)); // already gone
        assert!(sched.is_scheduled(b));
        let batch: Vec<&str> = sched.drain().into_iter().map(|(_, t)| t).collect();
        assert_eq!(batch, vec!["b"]);
    }

    #[test]
    fn handles_are_not_reused() {
        let mut sched = FrameScheduler::new();
        let a = sched.schedule("a");
        sched.drain();
        let b = sched.schedule("b");
        assert_ne!(a, b);
        // The stale handle cancels nothing.
        assert!(!sched.cancel(a));
        assert!(sched.is_scheduled(b));
    }

    #[test]
    fn reschedule_during_processing_lands_next_frame() {
        let mut sched = FrameScheduler::new();
        sched.schedule(1);
        let first = sched.drain();
        assert_eq!(first.len(), 1);
        // Simulates a task rescheduling itself while the batch runs.
        sched.schedule(2);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut sched = FrameScheduler::new();
        sched.schedule(1);
        sched.schedule(2);
        sched.clear();
        assert!(sched.is_empty());
    }

    // ── Debouncer ────────────────────────────────────────────────────

    #[test]
    fn fires_once_after_delay() {
        let mut debounce = Debouncer::new(100.0);
        debounce.touch(0.0);
        assert!(!debounce.poll(50.0));
        assert!(debounce.poll(100.0));
        assert!(!debounce.poll(150.0)); // disarmed after firing
    }

    #[test]
    fn retouch_pushes_deadline_out() {
        let mut debounce = Debouncer::new(100.0);
        debounce.touch(0.0);
        debounce.touch(80.0);
        assert!(!debounce.poll(120.0));
        assert!(debounce.poll(180.0));
    }

    #[test]
    fn cancel_disarms() {
        let mut debounce = Debouncer::new(100.0);
        debounce.touch(0.0);
        debounce.cancel();
        assert!(!debounce.is_pending());
        assert!(!debounce.poll(500.0));
    }

    #[test]
    fn unarmed_never_fires() {
        let mut debounce = Debouncer::new(100.0);
        assert!(!debounce.poll(1e9));
    }
}
