//! Teleprompter engine
//!
//! Owns the script, the pacing clock, the scroll synchronizer and the edit
//! session, and is the only place their state changes. Every user-driven
//! discontinuity cancels the pending tick before applying new state, so a tick
//! scheduled against the old state can never land on the new one.

mod engine_tests;
mod session;
mod snapshot;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::{PrompterConfig, TextStyle};
use crate::error::Result;
use crate::playback::{PlaybackClock, Speed, SpeedStep, TickDeadline};
use crate::scroll::{FrameRequest, LayoutProbe, ScrollSynchronizer};
use crate::script::Script;

pub use session::EditSession;
pub use snapshot::{PlaybackSnapshot, WordState};

type ExitCallback = Box<dyn FnOnce() + Send>;

/// Word-by-word playback engine
pub struct Teleprompter {
    script: Script,
    current_index: usize,
    clock: PlaybackClock,
    sync: ScrollSynchronizer,
    edit: Option<EditSession>,
    style: TextStyle,
    speed_step: f64,
    on_exit: Option<ExitCallback>,
    disposed: bool,
    exited: bool,
    revision: u64,
}

impl Teleprompter {
    /// Build from the entry configuration. A missing or empty script is an
    /// error the shell answers by routing to script entry.
    pub fn new(config: &PrompterConfig) -> Result<Self> {
        let script = Script::from_source(config.script.as_deref())?;
        Ok(Self::with_script(script, config))
    }

    pub fn with_script(script: Script, config: &PrompterConfig) -> Self {
        info!(words = script.len(), "Teleprompter created");
        Self {
            script,
            current_index: 0,
            clock: PlaybackClock::new(Speed::new(config.playback.speed)),
            sync: ScrollSynchronizer::new(&config.scroll),
            edit: None,
            style: config.style.clone(),
            speed_step: config.playback.speed_step,
            on_exit: None,
            disposed: false,
            exited: false,
            revision: 0,
        }
    }

    /// Callback invoked once when `exit()` runs
    pub fn on_exit(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_exit = Some(Box::new(callback));
        self
    }

    // =========================================================================
    // Read-only state
    // =========================================================================

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn words(&self) -> &[String] {
        self.script.words()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn word_state(&self, index: usize) -> WordState {
        WordState::of(index, self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn speed(&self) -> Speed {
        self.clock.speed()
    }

    /// Ticks applied since construction
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn auto_scroll(&self) -> bool {
        self.sync.auto_scroll()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.sync.offset()
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bumped on every observable change; compare to decide on a redraw
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing(),
            speed: self.speed(),
            current_index: self.current_index,
            words: self.script.shared_words(),
            is_editing: self.is_editing(),
            auto_scroll: self.auto_scroll(),
            scroll_offset: self.scroll_offset(),
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // =========================================================================
    // Playback clock
    // =========================================================================

    /// Play or pause. Ignored while editing or after disposal.
    pub fn toggle_play(&mut self, now: Instant) -> bool {
        if self.disposed || self.is_editing() {
            return false;
        }
        self.clock.toggle(now);
        self.touch();
        true
    }

    /// Set the speed multiplier, clamped to the allowed range
    pub fn update_speed(&mut self, speed: f64) -> bool {
        if self.disposed || !self.clock.set_speed(speed) {
            return false;
        }
        self.sync.cancel_frame();
        self.touch();
        true
    }

    /// Keyboard speed adjustment by one configured step
    pub fn nudge_speed(&mut self, direction: SpeedStep) -> bool {
        let next = self.clock.speed().stepped(direction, self.speed_step);
        self.update_speed(next.value())
    }

    /// Deadline the driver should wait for next, if playing
    pub fn next_tick(&self) -> Option<TickDeadline> {
        if self.disposed || self.is_editing() {
            return None;
        }
        self.clock.next_deadline()
    }

    /// Apply a fired pacing deadline. Stale or early deadlines are dropped.
    pub fn on_tick(&mut self, deadline: TickDeadline, now: Instant) -> bool {
        if self.disposed || self.is_editing() {
            return false;
        }
        if !self.clock.accept_tick(deadline.generation, now) {
            return false;
        }

        let last = self.script.last_index();
        if self.current_index < last {
            self.current_index += 1;
            self.sync.follow_current_word();
        }
        if self.current_index >= last {
            self.clock.pause();
            debug!(index = self.current_index, "Reached end of script");
        }
        self.touch();
        true
    }

    // =========================================================================
    // Scroll synchronizer
    // =========================================================================

    /// Start the frame loop; the surface calls this once it has rendered
    pub fn mount(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        self.sync.mount(now);
    }

    /// Frame the driver should wait for next
    pub fn next_frame(&mut self, now: Instant) -> Option<FrameRequest> {
        if self.disposed {
            return None;
        }
        self.sync.next_frame(now)
    }

    /// Run one synchronizer frame against the surface's layout
    pub fn on_frame(&mut self, request: FrameRequest, now: Instant, probe: &dyn LayoutProbe) -> bool {
        if self.disposed {
            return false;
        }
        let moved = self.sync.on_frame(request, now, self.current_index, probe);
        if moved {
            self.touch();
        }
        moved
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        if self.sync.auto_scroll() != enabled {
            self.sync.set_auto_scroll(enabled);
            debug!(enabled, "Auto-scroll changed");
            self.touch();
        }
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.set_auto_scroll(!self.sync.auto_scroll());
    }

    /// Manual scroll; only honoured while auto-scroll is off
    pub fn scroll_by(&mut self, delta: f64, probe: &dyn LayoutProbe) -> bool {
        if self.disposed || !self.sync.scroll_by(delta, probe) {
            return false;
        }
        self.touch();
        true
    }

    // =========================================================================
    // Seek / edit controller
    // =========================================================================

    /// Jump to `index` and pause. Out-of-range indices leave state unchanged.
    pub fn seek(&mut self, index: usize) -> bool {
        if self.disposed || self.is_editing() {
            return false;
        }
        if index >= self.script.len() {
            debug!(index, len = self.script.len(), "Ignoring out-of-range seek");
            return false;
        }
        self.clock.pause();
        self.sync.cancel_frame();
        self.current_index = index;
        self.sync.follow_current_word();
        debug!(index, "Seek");
        self.touch();
        true
    }

    /// Pause, rewind to the first word and ease the viewport back to the top
    pub fn restart(&mut self) {
        if self.disposed {
            return;
        }
        self.reset_playback();
        if self.edit.take().is_some() {
            debug!("Discarded edit session on restart");
        }
        info!("Restarted");
        self.touch();
    }

    /// Clean up like `restart`, stop the frame loop and notify the shell.
    /// Safe to call repeatedly; the callback runs once.
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.reset_playback();
        self.edit = None;
        self.dispose();
        self.exited = true;
        info!("Exited");
        if let Some(callback) = self.on_exit.take() {
            callback();
        }
    }

    /// Cancel the pending tick and frame and refuse further mutation
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clock.pause();
        self.clock.cancel();
        self.sync.unmount();
        self.disposed = true;
        debug!("Disposed");
        self.touch();
    }

    /// Pause playback and open an edit session over the current text
    pub fn enter_edit(&mut self) -> bool {
        if self.disposed || self.is_editing() {
            return false;
        }
        let was_playing = self.clock.pause();
        self.edit = Some(EditSession::new(self.script.text(), was_playing));
        debug!("Entered edit mode");
        self.touch();
        true
    }

    /// Keep the in-progress text on the open session
    pub fn update_draft(&mut self, text: &str) {
        if let Some(session) = self.edit.as_mut() {
            session.set_draft(text);
        }
    }

    /// Replace the script with `text`, rewind to the first word and stay
    /// paused. An empty text fails and leaves the session open.
    pub fn commit_edit(&mut self, text: &str) -> Result<()> {
        if self.disposed || !self.is_editing() {
            return Ok(());
        }
        let script = Script::parse(text)?;

        self.reset_playback();
        info!(words = script.len(), "Script replaced");
        self.script = script;
        self.edit = None;
        self.touch();
        Ok(())
    }

    /// Commit whatever the session's draft holds
    pub fn commit_draft(&mut self) -> Result<()> {
        let Some(draft) = self.edit.as_ref().map(|s| s.draft().to_string()) else {
            return Ok(());
        };
        self.commit_edit(&draft)
    }

    /// Close the session without touching the script. Playback resumes,
    /// measured from `now`, if it was running when the session opened.
    pub fn cancel_edit(&mut self, now: Instant) -> bool {
        let Some(session) = self.edit.take() else {
            return false;
        };
        if session.resumes_playback() && !self.disposed {
            self.clock.play(now);
        }
        debug!(resumed = self.is_playing(), "Cancelled edit mode");
        self.touch();
        true
    }

    /// Cancel the pending tick and frame, then rewind. The frame loop keeps
    /// running so the viewport can ease back to the top.
    fn reset_playback(&mut self) {
        self.clock.pause();
        self.clock.cancel();
        self.sync.cancel_frame();
        self.current_index = 0;
        self.sync.reset_to_top();
    }
}
