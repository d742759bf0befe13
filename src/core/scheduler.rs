//! Frame-update coalescing and idle detection.
//!
//! Pointer-move and scroll events can arrive far faster than the frame
//! rate. [`FrameScheduler`] collapses any burst into at most one pending
//! full-state recompute per frame. [`IdleTimer`] is the keep-last preview
//! trim trigger: every qualifying pointer move re-arms it, and re-arming
//! cancels the previous deadline.

use std::time::{Duration, Instant};

/// One-pending-recompute latch.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
}

impl FrameScheduler {
    /// Queue a recompute. Returns `true` if this call actually scheduled
    /// (i.e. nothing was pending yet).
    pub fn request_update(&mut self) -> bool {
        let fresh = !self.pending;
        self.pending = true;
        fresh
    }

    /// Consume the latch at frame time. The next event may re-queue.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Single-deadline timer. Arming replaces any pending deadline.
#[derive(Debug)]
pub struct IdleTimer {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, deadline: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.timeout);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// Report expiry, consuming the deadline so it fires once.
    pub fn fired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
