//! Frame request bookkeeping
//!
//! Models the animation-frame loop as explicit requests: at most one is
//! outstanding, and stopping the loop drops it.

use std::time::Duration;

use tokio::time::Instant;

/// A scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub id: u64,
    pub due: Instant,
}

/// Cancellable "run until stopped" frame loop
#[derive(Debug, Clone)]
pub struct FrameLoop {
    interval: Duration,
    running: bool,
    pending: Option<FrameRequest>,
    next_id: u64,
    last_frame: Option<Instant>,
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            pending: None,
            next_id: 0,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the loop and drop the outstanding request
    pub fn stop(&mut self) {
        self.running = false;
        self.pending = None;
        self.last_frame = None;
    }

    /// Request the next frame. Returns the already pending request if one
    /// exists, so callbacks never pile up.
    pub fn request(&mut self, now: Instant) -> Option<FrameRequest> {
        if !self.running {
            return None;
        }
        if let Some(pending) = self.pending {
            return Some(pending);
        }
        let request = FrameRequest {
            id: self.next_id,
            due: now + self.interval,
        };
        self.next_id += 1;
        self.pending = Some(request);
        Some(request)
    }

    /// Drop the outstanding request but keep the loop running; the next
    /// `request` issues a fresh one
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Consume a fired request. Returns the time since the previous frame,
    /// or `None` when the request is unknown, already consumed, or early.
    pub fn begin(&mut self, request: FrameRequest, now: Instant) -> Option<Duration> {
        let pending = self.pending?;
        if pending.id != request.id || now < pending.due {
            return None;
        }
        self.pending = None;
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(self.interval);
        self.last_frame = Some(now);
        Some(elapsed)
    }
}
