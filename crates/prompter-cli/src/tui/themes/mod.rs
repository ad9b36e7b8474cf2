//! Colours used by the TUI
//!
//! The script colour comes from the configured `TextStyle`; everything else
//! is derived to stay readable against the terminal's own background.

use prompter_core::TextStyle;
use ratatui::style::Color;

/// Colour palette for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Upcoming words and editor text
    pub text_color: Color,
    /// Words already read
    pub past_color: Color,
    /// Background of the current word
    pub highlight_bg_color: Color,
    /// Foreground of the current word
    pub highlight_fg_color: Color,
    pub accent_color: Color,
    pub dim_color: Color,
    pub border_color: Color,
    pub bg_color: Color,
    pub status_bar_bg_color: Color,
    pub success_color: Color,
    pub warning_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: Color::White,
            past_color: Color::DarkGray,
            highlight_bg_color: Color::Yellow,
            highlight_fg_color: Color::Black,
            accent_color: Color::Cyan,
            dim_color: Color::Gray,
            border_color: Color::DarkGray,
            bg_color: Color::Reset,
            status_bar_bg_color: Color::Reset,
            success_color: Color::Green,
            warning_color: Color::Yellow,
        }
    }
}

impl Theme {
    /// Palette with the configured script colour. Unknown colour names fall
    /// back to the default and are logged.
    pub fn from_style(style: &TextStyle) -> Self {
        let mut theme = Self::default();
        match parse_color(&style.text_color) {
            Some(color) => theme.text_color = color,
            None => tracing::warn!(color = %style.text_color, "Unknown text colour, using default"),
        }
        theme
    }
}

/// Parse a colour name ("lightcyan", "light-cyan") or "#rrggbb"
pub fn parse_color(name: &str) -> Option<Color> {
    name.trim().parse::<Color>().ok()
}
