//! Script editor - multi-line text buffer for script entry and edit mode

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Spaces inserted for Tab
const TAB_WIDTH: usize = 4;

/// Result of feeding a key to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Continue,
    /// Ctrl+S
    Submit,
    /// Esc
    Cancel,
}

/// Multi-line buffer with a byte-offset cursor and a vertical viewport
#[derive(Debug, Clone)]
pub struct ScriptEditor {
    content: String,
    /// Cursor position in the content (byte offset, always on a char boundary)
    cursor: usize,
    /// First visible line
    viewport_offset: usize,
    visible_lines: u16,
}

impl Default for ScriptEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptEditor {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            viewport_offset: 0,
            visible_lines: 10,
        }
    }

    /// Replace the buffer and put the cursor at the end
    pub fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
        self.cursor = self.content.len();
        self.viewport_offset = 0;
        self.ensure_cursor_visible();
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    pub fn set_visible_lines(&mut self, lines: u16) {
        let lines = lines.max(1);
        if self.visible_lines != lines {
            self.visible_lines = lines;
            self.ensure_cursor_visible();
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> EditorAction {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Char('s') if ctrl => return EditorAction::Submit,
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Enter => self.insert_char('\n'),
            KeyCode::Tab => self.insert_text(&" ".repeat(TAB_WIDTH)),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::PageUp => self.move_vertical(-(self.visible_lines as isize)),
            KeyCode::PageDown => self.move_vertical(self.visible_lines as isize),
            KeyCode::Home => self.cursor = self.line_start(self.cursor),
            KeyCode::End => self.cursor = self.line_end(self.cursor),
            _ => {}
        }
        self.ensure_cursor_visible();
        EditorAction::Continue
    }

    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert pasted text, normalising line endings
    pub fn insert_text(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.content.insert_str(self.cursor, &text);
        self.cursor += text.len();
        self.ensure_cursor_visible();
    }

    fn backspace(&mut self) {
        if let Some(ch) = self.content[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
            self.content.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    fn move_left(&mut self) {
        if let Some(ch) = self.content[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    fn move_right(&mut self) {
        if let Some(ch) = self.content[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    fn line_start(&self, pos: usize) -> usize {
        self.content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.content[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.content.len())
    }

    /// Move by whole lines, keeping the character column where possible
    fn move_vertical(&mut self, delta: isize) {
        let (line, _) = self.cursor_line_col();
        let column = self.content[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        let last = self.line_count() - 1;
        let target = (line as isize + delta).clamp(0, last as isize) as usize;
        if target == line {
            return;
        }

        let start = self.nth_line_start(target);
        let end = self.line_end(start);
        self.cursor = self.content[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end);
    }

    fn nth_line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        self.content
            .match_indices('\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
            .unwrap_or(self.content.len())
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Cursor as (line, byte offset within the line)
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        (line, self.cursor - self.line_start(self.cursor))
    }

    fn ensure_cursor_visible(&mut self) {
        let (line, _) = self.cursor_line_col();
        let visible = self.visible_lines as usize;

        if line < self.viewport_offset {
            self.viewport_offset = line;
        } else if line >= self.viewport_offset + visible {
            self.viewport_offset = line - visible + 1;
        }

        let max_offset = self.line_count().saturating_sub(visible);
        self.viewport_offset = self.viewport_offset.min(max_offset);
    }

    pub fn scroll_up(&mut self) {
        self.viewport_offset = self.viewport_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max_offset = self.line_count().saturating_sub(self.visible_lines as usize);
        if self.viewport_offset < max_offset {
            self.viewport_offset += 1;
        }
    }

    /// Visible lines with the cursor drawn as a reversed cell
    pub fn render(&self, text_style: Style) -> Paragraph<'_> {
        let (cursor_line, cursor_col) = self.cursor_line_col();
        let cursor_style = text_style.add_modifier(Modifier::REVERSED);

        let lines: Vec<Line> = self
            .content
            .split('\n')
            .enumerate()
            .skip(self.viewport_offset)
            .take(self.visible_lines as usize)
            .map(|(idx, line)| {
                if idx != cursor_line {
                    return Line::from(Span::styled(line, text_style));
                }
                let (before, rest) = line.split_at(cursor_col);
                let mut chars = rest.chars();
                let under = chars.next().map(String::from).unwrap_or_else(|| " ".into());
                Line::from(vec![
                    Span::styled(before, text_style),
                    Span::styled(under, cursor_style),
                    Span::styled(chars.as_str(), text_style),
                ])
            })
            .collect();

        Paragraph::new(lines)
    }
}
