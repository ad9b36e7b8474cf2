//! Play/pause state machine and pacing schedule
//!
//! The clock never owns a live timer. It exposes the next deadline together
//! with the generation it was computed for, and the driver hands both back
//! when the deadline fires. Any state change that invalidates the schedule
//! bumps the generation, so a tick computed earlier is rejected instead of
//! applied.

use tokio::time::Instant;
use tracing::{debug, warn};

use super::Speed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    #[default]
    Paused,
    Playing,
}

/// Identifies the pacing schedule a deadline belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// When the next tick is due, and under which schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDeadline {
    pub at: Instant,
    pub generation: Generation,
}

/// Pacing clock
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    mode: PlaybackMode,
    speed: Speed,
    /// Start of the current interval; `None` while paused
    anchor: Option<Instant>,
    generation: Generation,
    ticks: u64,
}

impl PlaybackClock {
    pub fn new(speed: Speed) -> Self {
        Self {
            mode: PlaybackMode::Paused,
            speed,
            anchor: None,
            generation: Generation::default(),
            ticks: 0,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Ticks accepted since construction
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start playing. The first tick is measured from `now`, never from a
    /// timestamp left over from before a pause.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.is_playing() {
            return false;
        }
        self.mode = PlaybackMode::Playing;
        self.anchor = Some(now);
        self.generation = self.generation.next();
        debug!(speed = self.speed.value(), "Playback started");
        true
    }

    /// Pause and cancel the pending tick
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.mode = PlaybackMode::Paused;
        self.cancel();
        debug!(ticks = self.ticks, "Playback paused");
        true
    }

    /// Flip between playing and paused, returning the new mode
    pub fn toggle(&mut self, now: Instant) -> PlaybackMode {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
        self.mode
    }

    /// Invalidate any outstanding deadline without changing the mode
    pub fn cancel(&mut self) {
        self.generation = self.generation.next();
        self.anchor = match self.mode {
            PlaybackMode::Playing => self.anchor,
            PlaybackMode::Paused => None,
        };
    }

    /// Clamp and apply a new speed. The pending tick is re-derived from the
    /// current interval start, so the cadence continues rather than restarts.
    /// If that makes it overdue it fires once, see [`Self::accept_tick`].
    /// Returns true if the speed changed. NaN is ignored.
    pub fn set_speed(&mut self, value: f64) -> bool {
        if value.is_nan() {
            debug!("Ignoring NaN speed");
            return false;
        }
        let speed = Speed::new(value);
        if speed == self.speed {
            return false;
        }
        self.speed = speed;
        debug!(speed = speed.value(), "Speed changed");
        true
    }

    /// Next tick deadline while playing
    pub fn next_deadline(&self) -> Option<TickDeadline> {
        if !self.is_playing() {
            return None;
        }
        let anchor = self.anchor?;
        Some(TickDeadline {
            at: anchor + self.speed.tick_interval(),
            generation: self.generation,
        })
    }

    /// Accept a fired deadline. Returns false for stale generations, ticks
    /// while paused, and deadlines that moved later after a speed change.
    pub fn accept_tick(&mut self, generation: Generation, now: Instant) -> bool {
        if generation != self.generation {
            warn!("Rejected stale pacing tick");
            return false;
        }
        let Some(deadline) = self.next_deadline() else {
            return false;
        };
        if now < deadline.at {
            return false;
        }
        // Anchor on the scheduled time so the cadence does not drift, unless
        // the following tick would already be due. That happens after a speed
        // increase or a stalled driver; restart the interval from `now` so
        // overdue ticks collapse into this one instead of firing in a burst.
        let following = deadline.at + self.speed.tick_interval();
        self.anchor = Some(if following <= now { now } else { deadline.at });
        self.ticks += 1;
        true
    }
}
