//! Prompter Core - Teleprompter playback engine
//!
//! This crate holds everything that does not touch a terminal:
//! - Script tokenizing
//! - Pacing clock with cancellable tick schedule
//! - Scroll synchronizer that keeps the current word centered
//! - Seek, restart, exit and edit controller
//! - Config loading

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod paths;
pub mod playback;
pub mod script;
pub mod scroll;

// Re-exports for convenience
pub use config::{PrompterConfig, TextStyle};
pub use engine::{EditSession, PlaybackSnapshot, Teleprompter, WordState};
pub use error::{PrompterError, Result};
pub use playback::{Speed, SpeedStep, TickDeadline};
pub use script::Script;
pub use scroll::{ElementBounds, FrameRequest, LayoutProbe};
