//! Read-only views of engine state for the presentation surface

use std::sync::Arc;

use crate::playback::Speed;

/// Visual state of one word relative to the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordState {
    Past,
    Current,
    Future,
}

impl WordState {
    pub fn of(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => WordState::Past,
            std::cmp::Ordering::Equal => WordState::Current,
            std::cmp::Ordering::Greater => WordState::Future,
        }
    }
}

/// Observable engine state at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub speed: Speed,
    pub current_index: usize,
    pub words: Arc<[String]>,
    pub is_editing: bool,
    pub auto_scroll: bool,
    pub scroll_offset: f64,
}

impl PlaybackSnapshot {
    pub fn word_state(&self, index: usize) -> WordState {
        WordState::of(index, self.current_index)
    }

    /// Fraction of the script already read, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.words.len() <= 1 {
            return 1.0;
        }
        self.current_index as f64 / (self.words.len() - 1) as f64
    }
}
