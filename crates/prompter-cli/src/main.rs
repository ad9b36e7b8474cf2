//! Prompter - a terminal teleprompter
//!
//! Presents a script word by word with:
//! - Play/pause and variable-speed auto-advance
//! - Click-to-seek on any word
//! - Live script editing
//! - Smooth scrolling that keeps the current word centered

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use prompter_core::{constants, paths, PrompterConfig};

mod tui;

/// Prompter - Terminal Teleprompter
#[derive(Parser)]
#[command(name = "prompter")]
#[command(about = "A terminal teleprompter that follows along word by word", long_about = None)]
struct Cli {
    /// Read the script from a file, or from stdin when set to "-"
    #[arg(short = 'f', long, conflicts_with = "text")]
    script_file: Option<PathBuf>,

    /// Script text given inline
    #[arg(short, long)]
    text: Option<String>,

    /// Config file (defaults to $PROMPTER_HOME/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial speed multiplier, clamped to 0.5..=2.0
    #[arg(short, long)]
    speed: Option<f64>,

    /// Text colour, e.g. "white", "lightcyan" or "#f5e6c8"
    #[arg(long)]
    color: Option<String>,
}

impl Cli {
    /// Load the config file and layer command-line values on top
    fn into_config(self) -> Result<PrompterConfig> {
        let path = self.config.clone().unwrap_or_else(paths::config_path);
        let mut config = PrompterConfig::load_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;

        if let Some(speed) = self.speed {
            config.playback.speed = speed;
        }
        if let Some(color) = self.color {
            config.style.text_color = color;
        }
        if let Some(script) = read_script(self.script_file.as_deref(), self.text)? {
            config.script = Some(script);
        }
        Ok(config)
    }
}

fn read_script(file: Option<&std::path::Path>, text: Option<String>) -> Result<Option<String>> {
    match file {
        Some(path) if path.as_os_str() == "-" => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(Some(script))
        }
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("failed to read script from {}", path.display())),
        None => Ok(text),
    }
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::{DisableBracketedPaste, DisableMouseCapture},
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(
        std::io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
}

/// Log to a file; stdout belongs to the TUI
fn init_logging() {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let Ok(log_file) = std::fs::File::create(log_dir.join(constants::paths::LOG_FILE_NAME)) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    init_logging();

    let cli = Cli::parse();
    let config = cli.into_config()?;
    tracing::info!(
        has_script = config.script.is_some(),
        speed = config.playback.speed,
        "Starting prompter"
    );

    let mut app = tui::App::new(config);
    app.run().await
}
