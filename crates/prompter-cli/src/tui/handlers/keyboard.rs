//! Keyboard event handlers
//!
//! Playback keys map to engine operations; in entry and edit mode keys go to
//! the script editor.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::time::Instant;

use prompter_core::SpeedStep;

use crate::tui::app::{App, View};
use crate::tui::input::EditorAction;

/// Playback-mode commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    TogglePlay,
    Faster,
    Slower,
    Restart,
    Edit,
    ToggleAutoScroll,
    Exit,
}

/// Map a key press in playback mode to its command
pub fn playback_action(code: KeyCode, modifiers: KeyModifiers) -> Option<PlaybackAction> {
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let action = match code {
        KeyCode::Char(' ') => PlaybackAction::TogglePlay,
        KeyCode::Up => PlaybackAction::Faster,
        KeyCode::Down => PlaybackAction::Slower,
        KeyCode::Char('r') | KeyCode::Char('R') => PlaybackAction::Restart,
        KeyCode::Char('e') | KeyCode::Char('E') => PlaybackAction::Edit,
        KeyCode::Char('a') | KeyCode::Char('A') => PlaybackAction::ToggleAutoScroll,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => PlaybackAction::Exit,
        _ => return None,
    };
    Some(action)
}

impl App {
    /// Main keyboard event dispatcher
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        let code = key_event.code;
        let modifiers = key_event.modifiers;

        // Ctrl+C leaves from anywhere
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.request_exit();
            return;
        }

        match self.view() {
            View::ScriptEntry => match self.editor.handle_key(code, modifiers) {
                EditorAction::Submit => self.submit_entry(),
                EditorAction::Cancel => self.should_quit = true,
                EditorAction::Continue => {}
            },
            View::Editing => match self.editor.handle_key(code, modifiers) {
                EditorAction::Submit => self.commit_edit(),
                EditorAction::Cancel => self.cancel_edit(),
                EditorAction::Continue => {
                    if let Some(engine) = self.engine.as_mut() {
                        engine.update_draft(self.editor.content());
                    }
                }
            },
            View::Playback => {
                if let Some(action) = playback_action(code, modifiers) {
                    self.apply_playback_action(action);
                }
            }
        }
    }

    fn apply_playback_action(&mut self, action: PlaybackAction) {
        if action == PlaybackAction::Edit {
            self.begin_edit();
            return;
        }
        if action == PlaybackAction::Exit {
            self.request_exit();
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match action {
            PlaybackAction::TogglePlay => {
                engine.toggle_play(Instant::now());
            }
            PlaybackAction::Faster => {
                engine.nudge_speed(SpeedStep::Faster);
            }
            PlaybackAction::Slower => {
                engine.nudge_speed(SpeedStep::Slower);
            }
            PlaybackAction::Restart => engine.restart(),
            PlaybackAction::ToggleAutoScroll => engine.toggle_auto_scroll(),
            PlaybackAction::Edit | PlaybackAction::Exit => {}
        }
    }

    /// Bracketed paste goes to the editor when one is showing
    pub fn handle_paste(&mut self, text: String) {
        match self.view() {
            View::ScriptEntry => self.editor.insert_text(&text),
            View::Editing => {
                self.editor.insert_text(&text);
                if let Some(engine) = self.engine.as_mut() {
                    engine.update_draft(self.editor.content());
                }
            }
            View::Playback => {}
        }
    }
}
