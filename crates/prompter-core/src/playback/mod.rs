//! Playback clock
//!
//! Owns play/pause state, speed, and the pacing schedule that advances the
//! current word.

mod clock;
mod speed;

pub use clock::{Generation, PlaybackClock, PlaybackMode, TickDeadline};
pub use speed::{Speed, SpeedStep};
