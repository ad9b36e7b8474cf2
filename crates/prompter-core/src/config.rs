//! Configuration management
//!
//! Loads the entry bundle from `${PROMPTER_HOME}/config.toml` with defaults for
//! every field. Command-line values are layered on top by the binary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{pacing, scroll};
use crate::error::{PrompterError, Result};
use crate::paths;

/// Entry configuration for one teleprompter session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrompterConfig {
    /// Raw script text; `None` routes the shell to script entry
    pub script: Option<String>,
    /// Text styling passed through to the presentation surface
    pub style: TextStyle,
    /// Pacing settings
    pub playback: PlaybackConfig,
    /// Scroll synchronizer settings
    pub scroll: ScrollConfig,
}

/// Styling the engine carries but never interprets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: u16,
    pub font_family: String,
    pub text_color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "inter".to_string(),
            text_color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial speed multiplier, clamped on use
    pub speed: f64,
    /// Keyboard speed increment
    pub speed_step: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: pacing::DEFAULT_SPEED,
            speed_step: pacing::SPEED_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub initial_delay_ms: u64,
    pub ease_ms: u64,
    pub frame_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: scroll::INITIAL_ALIGN_DELAY.as_millis() as u64,
            ease_ms: scroll::EASE_TIME_CONSTANT.as_millis() as u64,
            frame_ms: scroll::FRAME_INTERVAL.as_millis() as u64,
        }
    }
}

impl ScrollConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Easing time constant; zero means jump straight to the target
    pub fn ease(&self) -> Duration {
        Duration::from_millis(self.ease_ms)
    }

    /// Frame cadence, never shorter than one millisecond
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

impl PrompterConfig {
    /// Loads configuration from the default config path
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parses and validates a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the script text
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.playback.speed.is_finite() {
            return Err(PrompterError::Config("playback.speed must be a number".into()));
        }
        if !self.playback.speed_step.is_finite() || self.playback.speed_step <= 0.0 {
            return Err(PrompterError::Config(
                "playback.speed_step must be positive".into(),
            ));
        }
        if self.style.font_size == 0 {
            return Err(PrompterError::Config("style.font_size must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PrompterConfig::default();
        assert!(config.script.is_none());
        assert_eq!(config.playback.speed, 2.0);
        assert_eq!(config.playback.speed_step, 0.1);
        assert_eq!(config.scroll.initial_delay(), Duration::from_millis(100));
        assert_eq!(config.style.font_family, "inter");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PrompterConfig::from_toml_str(
            r##"
script = "hello there"

[style]
text_color = "#785340"

[playback]
speed = 1.5
"##,
        )
        .unwrap();

        assert_eq!(config.script.as_deref(), Some("hello there"));
        assert_eq!(config.style.text_color, "#785340");
        assert_eq!(config.style.font_size, 16);
        assert_eq!(config.playback.speed, 1.5);
        assert_eq!(config.playback.speed_step, 0.1);
        assert_eq!(config.scroll.frame_ms, 16);
    }

    #[test]
    fn test_rejects_bad_step() {
        let err = PrompterConfig::from_toml_str("[playback]\nspeed_step = 0.0\n").unwrap_err();
        assert!(matches!(err, PrompterError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = PrompterConfig::from_toml_str("[playback\nspeed = 1").unwrap_err();
        assert!(matches!(err, PrompterError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = PrompterConfig::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.playback.speed, 2.0);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[scroll]\nease_ms = 0\n").unwrap();

        let config = PrompterConfig::load_from(&path).unwrap();
        assert_eq!(config.scroll.ease(), Duration::ZERO);
        assert_eq!(config.scroll.initial_delay_ms, 100);
    }
}
