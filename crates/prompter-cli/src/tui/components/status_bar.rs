//! Status bar component - playback controls and shortcuts along the bottom

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use prompter_core::{PlaybackSnapshot, Speed, TextStyle};

use crate::tui::themes::Theme;

/// Cells in the speed slider track
const SLIDER_WIDTH: usize = 10;

/// Render the controls bar for playback mode
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    theme: &Theme,
    snapshot: &PlaybackSnapshot,
    style: &TextStyle,
) {
    let bg = Paragraph::new("").style(Style::default().bg(theme.status_bar_bg_color));
    f.render_widget(bg, area);

    let sep = || Span::styled(" │ ", Style::default().fg(theme.dim_color));
    let (state_icon, state_color) = if snapshot.is_playing {
        ("▶ playing", theme.success_color)
    } else {
        ("⏸ paused ", theme.dim_color)
    };

    let slider = speed_slider(snapshot.speed, SLIDER_WIDTH);
    let position = position_label(snapshot);
    let scroll = if snapshot.auto_scroll { "auto" } else { "manual" };
    let font = format!("{} {}", style.font_family, style.font_size);

    let left_spans = vec![
        Span::raw(" "),
        Span::styled(
            state_icon,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(slider, Style::default().fg(theme.accent_color)),
        Span::styled(
            format!(" {}", snapshot.speed),
            Style::default().fg(theme.text_color),
        ),
        sep(),
        Span::styled(position, Style::default().fg(theme.text_color)),
        sep(),
        Span::styled(scroll, Style::default().fg(theme.dim_color)),
        sep(),
        Span::styled(font, Style::default().fg(theme.dim_color)),
    ];
    let left_width = left_spans.iter().map(|s| s.content.width()).sum::<usize>() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(left_width), Constraint::Fill(1)])
        .split(area);

    f.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);

    let commands = build_commands_for_width(chunks[1].width as usize, theme, PLAYBACK_COMMANDS);
    f.render_widget(
        Paragraph::new(Line::from(commands)).alignment(Alignment::Right),
        chunks[1],
    );
}

/// Render the hint bar for the script editor
pub fn render_editor_bar(f: &mut Frame, area: Rect, theme: &Theme, editing_existing: bool) {
    let bg = Paragraph::new("").style(Style::default().bg(theme.status_bar_bg_color));
    f.render_widget(bg, area);

    let commands = if editing_existing {
        EDIT_COMMANDS
    } else {
        ENTRY_COMMANDS
    };
    let spans = build_commands_for_width(area.width as usize, theme, commands);
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}

/// (key, description), highest priority first
type Command = (&'static str, &'static str);

const PLAYBACK_COMMANDS: &[Command] = &[
    (" q ", "exit "),
    (" Space ", "play "),
    (" ↑↓ ", "speed "),
    (" r ", "restart "),
    (" e ", "edit "),
    (" a ", "auto-scroll "),
];

const EDIT_COMMANDS: &[Command] = &[(" ^S ", "save "), (" Esc ", "cancel ")];

const ENTRY_COMMANDS: &[Command] = &[(" ^S ", "start "), (" Esc ", "quit ")];

/// Command spans that fit in `width`, dropping the lowest priority first
fn build_commands_for_width<'a>(
    width: usize,
    theme: &Theme,
    commands: &'a [Command],
) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut used_width = 0;

    for (key, desc) in commands {
        let cmd_width = key.width() + desc.width();
        if used_width + cmd_width > width {
            break;
        }
        spans.push(Span::styled(
            *key,
            Style::default().bg(theme.border_color).fg(theme.text_color),
        ));
        spans.push(Span::styled(*desc, Style::default().fg(theme.dim_color)));
        used_width += cmd_width;
    }

    spans
}

/// Word position and how much of the script has been read, e.g. "3/5 50%"
fn position_label(snapshot: &PlaybackSnapshot) -> String {
    format!(
        "{}/{} {:.0}%",
        snapshot.current_index + 1,
        snapshot.words.len(),
        snapshot.progress() * 100.0
    )
}

/// Text slider for the speed range, e.g. "0.5 ━━━━●───── 2.0"
pub fn speed_slider(speed: Speed, width: usize) -> String {
    let width = width.max(2);
    let range = Speed::MAX.value() - Speed::MIN.value();
    let fraction = (speed.value() - Speed::MIN.value()) / range;
    let knob = (fraction * (width - 1) as f64).round() as usize;

    let track: String = (0..width)
        .map(|i| match i.cmp(&knob) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '●',
            std::cmp::Ordering::Greater => '─',
        })
        .collect();
    format!("{:.1} {} {:.1}", Speed::MIN.value(), track, Speed::MAX.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_slider_positions() {
        assert_eq!(speed_slider(Speed::MIN, 5), "0.5 ●──── 2.0");
        assert_eq!(speed_slider(Speed::MAX, 5), "0.5 ━━━━● 2.0");
        assert_eq!(speed_slider(Speed::new(1.25), 5), "0.5 ━━●── 2.0");
    }

    #[test]
    fn test_position_label_shows_progress() {
        let words: std::sync::Arc<[String]> =
            prompter_core::script::tokenize("a b c d e").into();
        let mut snapshot = PlaybackSnapshot {
            is_playing: false,
            speed: Speed::default(),
            current_index: 0,
            words,
            is_editing: false,
            auto_scroll: true,
            scroll_offset: 0.0,
        };
        assert_eq!(position_label(&snapshot), "1/5 0%");
        snapshot.current_index = 2;
        assert_eq!(position_label(&snapshot), "3/5 50%");
        snapshot.current_index = 4;
        assert_eq!(position_label(&snapshot), "5/5 100%");
    }

    #[test]
    fn test_commands_drop_lowest_priority() {
        let theme = Theme::default();
        let all = build_commands_for_width(200, &theme, PLAYBACK_COMMANDS);
        assert_eq!(all.len(), PLAYBACK_COMMANDS.len() * 2);

        let narrow = build_commands_for_width(10, &theme, PLAYBACK_COMMANDS);
        assert_eq!(narrow.len(), 2);
        assert_eq!(narrow[0].content, " q ");
        assert!(build_commands_for_width(2, &theme, PLAYBACK_COMMANDS).is_empty());
    }
}
