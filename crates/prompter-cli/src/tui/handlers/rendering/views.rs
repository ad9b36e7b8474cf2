//! View rendering
//!
//! Renders the main views: playback and the script editor.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, BorderType, Borders},
    Frame,
};

use crate::tui::app::App;
use crate::tui::components::{render_editor_bar, render_script, render_status_bar};
use crate::tui::state::line_gap;

impl App {
    /// Render the scrolling script with the controls bar below it
    pub fn render_playback_view(&mut self, f: &mut Frame) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        let snapshot = engine.snapshot();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(f.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border_color))
            .title(" Prompter ");
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        // Words are laid out here so the synchronizer measures what is drawn
        self.word_layout
            .update(&snapshot.words, inner.width, line_gap(engine.style().font_size));
        self.word_layout.set_viewport_height(inner.height);
        self.layout.words_area = Some(inner);

        render_script(f.buffer_mut(), inner, &self.theme, &snapshot, &self.word_layout);
        render_status_bar(f, chunks[1], &self.theme, &snapshot, engine.style());
    }

    /// Render the script editor for entry or edit mode
    pub fn render_editor_view(&mut self, f: &mut Frame, title: &str, editing_existing: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(f.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.accent_color))
            .title(title.to_string());
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        self.editor.set_visible_lines(inner.height);
        f.render_widget(
            self.editor.render(Style::default().fg(self.theme.text_color)),
            inner,
        );
        render_editor_bar(f, chunks[1], &self.theme, editing_existing);
    }
}
