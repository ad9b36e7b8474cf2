//! Scroll synchronization
//!
//! Per-frame viewport correction toward the current word, and the frame loop
//! bookkeeping that drives it.

mod frame;
mod synchronizer;

pub use frame::{FrameLoop, FrameRequest};
pub use synchronizer::{centered_offset, ElementBounds, LayoutProbe, ScrollSynchronizer};
