//! Main application state and event loop

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{sleep, sleep_until, Instant};

use prompter_core::{PrompterConfig, Script, Teleprompter};

use crate::tui::components::{Toast, ToastQueue};
use crate::tui::input::ScriptEditor;
use crate::tui::state::{LayoutState, WordLayout};
use crate::tui::themes::Theme;

/// How often to redraw while a toast is counting down
const TOAST_POLL: Duration = Duration::from_millis(100);

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// No script yet; the editor collects one
    ScriptEntry,
    /// Words on screen, playback controls active
    Playback,
    /// Edit session open over the current script
    Editing,
}

/// Main application state
pub struct App {
    pub(crate) config: PrompterConfig,
    pub(crate) engine: Option<Teleprompter>,
    pub(crate) editor: ScriptEditor,
    pub(crate) word_layout: WordLayout,
    pub(crate) layout: LayoutState,
    pub(crate) toasts: ToastQueue,
    pub(crate) theme: Theme,
    /// Set by the engine's exit callback
    exit_requested: Arc<AtomicBool>,
    pub should_quit: bool,
    needs_redraw: bool,
    /// Whether the current engine's frame loop has been started
    mounted: bool,
    last_revision: Option<u64>,
}

impl App {
    pub fn new(config: PrompterConfig) -> Self {
        let theme = Theme::from_style(&config.style);
        let mut app = Self {
            config,
            engine: None,
            editor: ScriptEditor::new(),
            word_layout: WordLayout::default(),
            layout: LayoutState::new(),
            toasts: ToastQueue::new(),
            theme,
            exit_requested: Arc::new(AtomicBool::new(false)),
            should_quit: false,
            needs_redraw: true,
            mounted: false,
            last_revision: None,
        };

        match Teleprompter::new(&app.config) {
            Ok(engine) => app.install_engine(engine),
            Err(e) if e.needs_script_entry() => {
                tracing::info!("No usable script ({}), showing script entry", e);
            }
            Err(e) => tracing::warn!("Failed to start playback: {}", e),
        }
        app
    }

    pub fn view(&self) -> View {
        match &self.engine {
            None => View::ScriptEntry,
            Some(engine) if engine.is_editing() => View::Editing,
            Some(_) => View::Playback,
        }
    }

    #[cfg(test)]
    pub fn engine(&self) -> Option<&Teleprompter> {
        self.engine.as_ref()
    }

    fn install_engine(&mut self, engine: Teleprompter) {
        let flag = self.exit_requested.clone();
        self.engine = Some(engine.on_exit(move || flag.store(true, Ordering::SeqCst)));
        self.mounted = false;
        self.last_revision = None;
    }

    /// Start playback with the text typed on the entry screen
    pub(crate) fn submit_entry(&mut self) {
        match Script::parse(self.editor.content()) {
            Ok(script) => {
                tracing::info!(words = script.len(), "Script entered");
                let engine = Teleprompter::with_script(script, &self.config);
                self.install_engine(engine);
                self.editor.clear();
            }
            Err(e) => {
                tracing::debug!("Rejected script entry: {}", e);
                self.show_toast(Toast::warning("Script is empty. Type something to read."));
            }
        }
    }

    /// Open an edit session with the editor seeded from the script text
    pub(crate) fn begin_edit(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if engine.enter_edit() {
            let text = engine
                .edit_session()
                .map(|session| session.original().to_string())
                .unwrap_or_default();
            self.editor.set_text(&text);
        }
    }

    pub(crate) fn commit_edit(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.commit_draft() {
            Ok(()) => {
                self.editor.clear();
                self.show_toast(Toast::success("Script updated"));
            }
            Err(e) => {
                tracing::debug!("Rejected script edit: {}", e);
                self.show_toast(Toast::warning("Script is empty. Keep editing or press Esc."));
            }
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.cancel_edit(Instant::now());
        }
        self.editor.clear();
    }

    /// Leave the app, letting the engine clean up first
    pub(crate) fn request_exit(&mut self) {
        match self.engine.as_mut() {
            Some(engine) => engine.exit(),
            None => self.should_quit = true,
        }
    }

    /// Whether the event loop should stop
    pub fn is_quitting(&self) -> bool {
        self.should_quit || self.exit_requested.load(Ordering::SeqCst)
    }

    pub(crate) fn show_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
        self.needs_redraw = true;
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal).await;

        if let Some(engine) = self.engine.as_mut() {
            engine.dispose();
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    ///
    /// Multiplexes terminal events with the engine's pacing and frame
    /// deadlines. Both deadlines are re-read from the engine every pass, so a
    /// cancelled tick or frame is simply never waited for.
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            if self.toasts.tick() {
                self.needs_redraw = true;
            }
            let revision = self.engine.as_ref().map(Teleprompter::revision);
            if revision != self.last_revision {
                self.last_revision = revision;
                self.needs_redraw = true;
            }

            // Only render if something changed
            if self.needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                self.needs_redraw = false;
            }

            // Start following words once they have been laid out
            if !self.mounted {
                if let Some(engine) = self.engine.as_mut() {
                    engine.mount(Instant::now());
                    self.mounted = true;
                }
            }

            let now = Instant::now();
            let tick = self.engine.as_ref().and_then(Teleprompter::next_tick);
            let frame = self.engine.as_mut().and_then(|e| e.next_frame(now));

            tokio::select! {
                biased; // Prefer events over timers when both are ready

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                        None => break,
                    }
                }
                _ = sleep_until(tick.map_or(now, |t| t.at)), if tick.is_some() => {
                    if let (Some(engine), Some(tick)) = (self.engine.as_mut(), tick) {
                        engine.on_tick(tick, Instant::now());
                    }
                }
                _ = sleep_until(frame.map_or(now, |f| f.due)), if frame.is_some() => {
                    if let (Some(engine), Some(frame)) = (self.engine.as_mut(), frame) {
                        engine.on_frame(frame, Instant::now(), &self.word_layout);
                    }
                }
                _ = sleep(TOAST_POLL), if !self.toasts.is_empty() => {}
            }

            if self.is_quitting() {
                break;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Paste(text) => self.handle_paste(text),
            Event::Resize(_, _) => {}
            _ => return,
        }
        self.needs_redraw = true;
    }
}
