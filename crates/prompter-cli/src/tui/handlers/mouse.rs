//! Mouse event handling
//!
//! Left click on a word seeks to it. The wheel scrolls the script while
//! auto-scroll is off, and scrolls the editor in entry and edit mode.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, View};

/// Rows moved per wheel notch
const WHEEL_ROWS: f64 = 3.0;

impl App {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match self.view() {
            View::Playback => match mouse.kind {
                MouseEventKind::ScrollDown => self.scroll_words(WHEEL_ROWS),
                MouseEventKind::ScrollUp => self.scroll_words(-WHEEL_ROWS),
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = self.hit_test_word(mouse.column, mouse.row) {
                        if let Some(engine) = self.engine.as_mut() {
                            engine.seek(index);
                        }
                    }
                }
                _ => {}
            },
            View::ScriptEntry | View::Editing => match mouse.kind {
                MouseEventKind::ScrollDown => self.editor.scroll_down(),
                MouseEventKind::ScrollUp => self.editor.scroll_up(),
                _ => {}
            },
        }
    }

    fn scroll_words(&mut self, delta: f64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.scroll_by(delta, &self.word_layout);
        }
    }
}
