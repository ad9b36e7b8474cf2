//! Script view - the scrolling word area
//!
//! Draws every word at its wrapped position, shifted up by the synchronizer's
//! offset, coloured by whether it has been read.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use prompter_core::{PlaybackSnapshot, WordState};

use crate::tui::state::WordLayout;
use crate::tui::themes::Theme;

/// Style for a word in the given state
pub fn word_style(state: WordState, theme: &Theme) -> Style {
    match state {
        WordState::Past => Style::default().fg(theme.past_color),
        WordState::Current => Style::default()
            .fg(theme.highlight_fg_color)
            .bg(theme.highlight_bg_color)
            .add_modifier(Modifier::BOLD),
        WordState::Future => Style::default().fg(theme.text_color),
    }
}

/// Draw the visible part of the script into `area`
pub fn render_script(
    buf: &mut Buffer,
    area: Rect,
    theme: &Theme,
    snapshot: &PlaybackSnapshot,
    layout: &WordLayout,
) {
    let offset = snapshot.scroll_offset.max(0.0).round() as usize;

    for (index, (word, slot)) in snapshot.words.iter().zip(layout.slots()).enumerate() {
        let top = layout.line_top(slot.line);
        if top < offset {
            continue;
        }
        let row = top - offset;
        // Slots are in reading order, so nothing below is visible either
        if row >= area.height as usize {
            break;
        }
        buf.set_stringn(
            area.x + slot.col,
            area.y + row as u16,
            word,
            slot.width as usize,
            word_style(snapshot.word_state(index), theme),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use prompter_core::Speed;

    use super::*;

    fn snapshot(words: &Arc<[String]>, current: usize, offset: f64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: false,
            speed: Speed::default(),
            current_index: current,
            words: words.clone(),
            is_editing: false,
            auto_scroll: true,
            scroll_offset: offset,
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_renders_wrapped_words_with_offset() {
        let words: Arc<[String]> = prompter_core::script::tokenize("the quick brown fox jumps").into();
        let mut layout = WordLayout::default();
        layout.update(&words, 10, 0);
        let area = Rect::new(0, 0, 10, 2);
        let theme = Theme::default();

        let mut buf = Buffer::empty(area);
        render_script(&mut buf, area, &theme, &snapshot(&words, 1, 0.0), &layout);
        assert_eq!(row_text(&buf, 0), "the quick");
        assert_eq!(row_text(&buf, 1), "brown fox");

        let mut buf = Buffer::empty(area);
        render_script(&mut buf, area, &theme, &snapshot(&words, 1, 1.0), &layout);
        assert_eq!(row_text(&buf, 0), "brown fox");
        assert_eq!(row_text(&buf, 1), "jumps");
    }

    #[test]
    fn test_current_word_is_highlighted() {
        let words: Arc<[String]> = prompter_core::script::tokenize("one two three").into();
        let mut layout = WordLayout::default();
        layout.update(&words, 20, 0);
        let area = Rect::new(0, 0, 20, 1);
        let theme = Theme::default();
        let mut buf = Buffer::empty(area);

        render_script(&mut buf, area, &theme, &snapshot(&words, 1, 0.0), &layout);
        assert_eq!(buf[(0, 0)].fg, theme.past_color);
        assert_eq!(buf[(4, 0)].bg, theme.highlight_bg_color);
        assert_eq!(buf[(8, 0)].fg, theme.text_color);
    }
}
