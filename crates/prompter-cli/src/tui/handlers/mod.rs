//! Event handlers and rendering for the App
//!
//! Each module adds an `impl App` block for one concern.

mod keyboard;
mod mouse;
mod rendering;
