//! Layout State - Cached layout areas
//!
//! Updated each frame during rendering, used for mouse event handling.

use ratatui::layout::Rect;

/// Cached layout areas for hit testing and rendering
#[derive(Debug, Default)]
pub struct LayoutState {
    /// Inner area the script words are drawn in
    pub words_area: Option<Rect>,
}

impl LayoutState {
    /// Create a new empty layout state
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every area; the next draw fills in the ones it uses
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
