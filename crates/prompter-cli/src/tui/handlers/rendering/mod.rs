//! UI rendering coordinator
//!
//! Main entry point that dispatches to the view renderers.

mod views;

use ratatui::{style::Style, widgets::Block, Frame};

use crate::tui::app::{App, View};
use crate::tui::components::render_toasts;

impl App {
    /// Main UI rendering dispatcher
    pub fn ui(&mut self, f: &mut Frame) {
        let bg = Block::default().style(Style::default().bg(self.theme.bg_color));
        f.render_widget(bg, f.area());

        self.layout.clear();
        match self.view() {
            View::ScriptEntry => self.render_editor_view(f, " Enter a script ", false),
            View::Editing => self.render_editor_view(f, " Edit script ", true),
            View::Playback => self.render_playback_view(f),
        }

        let area = f.area();
        render_toasts(f.buffer_mut(), area, &self.toasts, &self.theme);
    }
}
