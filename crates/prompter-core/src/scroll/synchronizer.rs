//! Scroll synchronizer
//!
//! Each frame reads the current word's bounds from the presentation surface
//! and eases the viewport offset toward the position that centers it. The
//! synchronizer is the only writer of the offset.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use super::frame::{FrameLoop, FrameRequest};
use crate::config::ScrollConfig;
use crate::constants::scroll::SNAP_DISTANCE;

/// Vertical extent of a rendered word, in content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// Position queries answered by the presentation surface
pub trait LayoutProbe {
    /// Visible height of the scroll container; zero while not laid out
    fn container_height(&self) -> f64;

    /// Total height of the laid-out content
    fn content_height(&self) -> f64;

    /// Bounds of the word at `index`, `None` if it is not rendered yet
    fn element_bounds(&self, index: usize) -> Option<ElementBounds>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitialAlignment {
    Unmounted,
    Pending { due: Instant },
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTarget {
    CurrentWord,
    Top,
}

/// Offset that vertically centers `bounds` in a container of `container_height`
pub fn centered_offset(bounds: ElementBounds, container_height: f64) -> f64 {
    bounds.top - container_height / 2.0 + bounds.height / 2.0
}

fn max_offset(probe: &dyn LayoutProbe) -> f64 {
    (probe.content_height() - probe.container_height()).max(0.0)
}

/// Continuous viewport follower
#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    offset: f64,
    auto_scroll: bool,
    target: ScrollTarget,
    alignment: InitialAlignment,
    initial_delay: Duration,
    ease: Duration,
    frames: FrameLoop,
}

impl ScrollSynchronizer {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            offset: 0.0,
            auto_scroll: true,
            target: ScrollTarget::CurrentWord,
            alignment: InitialAlignment::Unmounted,
            initial_delay: config.initial_delay(),
            ease: config.ease(),
            frames: FrameLoop::new(config.frame_interval()),
        }
    }

    /// Current viewport offset in rows
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn is_mounted(&self) -> bool {
        self.frames.is_running()
    }

    #[cfg(test)]
    fn is_aligned(&self) -> bool {
        self.alignment == InitialAlignment::Done
    }

    /// Start the frame loop and schedule the one-time initial alignment
    pub fn mount(&mut self, now: Instant) {
        self.frames.start();
        self.alignment = InitialAlignment::Pending {
            due: now + self.initial_delay,
        };
        debug!(delay_ms = self.initial_delay.as_millis() as u64, "Scroll synchronizer mounted");
    }

    /// Stop the frame loop and drop the outstanding frame request
    pub fn unmount(&mut self) {
        self.frames.stop();
        self.alignment = InitialAlignment::Unmounted;
    }

    /// Drop the outstanding frame request; the loop stays mounted
    pub fn cancel_frame(&mut self) {
        self.frames.cancel();
    }

    /// Next frame to wait for, if the loop is running
    pub fn next_frame(&mut self, now: Instant) -> Option<FrameRequest> {
        self.frames.request(now)
    }

    /// Ease back to the top until the current word changes
    pub fn reset_to_top(&mut self) {
        self.target = ScrollTarget::Top;
    }

    /// Resume following the current word after an index change
    pub fn follow_current_word(&mut self) {
        self.target = ScrollTarget::CurrentWord;
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    /// Manual scroll, honoured only while auto-scroll is off.
    /// Returns true if the offset moved.
    pub fn scroll_by(&mut self, delta: f64, probe: &dyn LayoutProbe) -> bool {
        if self.auto_scroll || !delta.is_finite() {
            return false;
        }
        self.target = ScrollTarget::CurrentWord;
        let next = (self.offset + delta).clamp(0.0, max_offset(probe));
        self.set_offset(next)
    }

    /// Where the viewport should settle for `index`, if it can be measured
    pub fn target_offset(&self, index: usize, probe: &dyn LayoutProbe) -> Option<f64> {
        let container = probe.container_height();
        if container <= 0.0 {
            return None;
        }
        if self.target == ScrollTarget::Top {
            return Some(0.0);
        }
        let bounds = probe.element_bounds(index)?;
        Some(centered_offset(bounds, container).clamp(0.0, max_offset(probe)))
    }

    /// Run one frame. Returns true if the offset changed.
    pub fn on_frame(
        &mut self,
        request: FrameRequest,
        now: Instant,
        index: usize,
        probe: &dyn LayoutProbe,
    ) -> bool {
        let Some(elapsed) = self.frames.begin(request, now) else {
            return false;
        };
        self.step(now, elapsed, index, probe)
    }

    fn step(
        &mut self,
        now: Instant,
        elapsed: Duration,
        index: usize,
        probe: &dyn LayoutProbe,
    ) -> bool {
        let container = probe.container_height();
        if container.is_nan() || container <= 0.0 {
            return false;
        }

        match self.alignment {
            InitialAlignment::Unmounted => return false,
            InitialAlignment::Pending { due } => {
                if now < due {
                    return false;
                }
                let Some(target) = self.target_offset(index, probe) else {
                    return false;
                };
                self.alignment = InitialAlignment::Done;
                debug!(offset = target, "Initial scroll alignment");
                return self.set_offset(target);
            }
            InitialAlignment::Done => {}
        }

        let target = if self.auto_scroll || self.target == ScrollTarget::Top {
            match self.target_offset(index, probe) {
                Some(target) => target,
                None => return false,
            }
        } else {
            // Manual mode only keeps the offset inside the content
            self.offset.clamp(0.0, max_offset(probe))
        };
        self.ease_toward(target, elapsed)
    }

    fn ease_toward(&mut self, target: f64, elapsed: Duration) -> bool {
        let distance = target - self.offset;
        if distance.abs() <= SNAP_DISTANCE || self.ease.is_zero() {
            return self.set_offset(target);
        }
        let alpha = 1.0 - (-elapsed.as_secs_f64() / self.ease.as_secs_f64()).exp();
        self.set_offset(self.offset + distance * alpha)
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }
}
