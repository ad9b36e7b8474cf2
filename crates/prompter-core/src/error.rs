//! Error types for the playback engine

use thiserror::Error;

/// Engine error type
///
/// Only construction and configuration can fail. Runtime input such as an
/// out-of-range seek or speed is clamped or ignored instead.
#[derive(Debug, Error)]
pub enum PrompterError {
    /// No script was supplied at all
    #[error("no script supplied")]
    MissingScript,

    /// The script contains no words after tokenizing
    #[error("script contains no words")]
    EmptyScript,

    /// A configuration value is unusable
    #[error("invalid config: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PrompterError {
    /// Whether the caller should route to script entry instead of playback
    pub fn needs_script_entry(&self) -> bool {
        matches!(self, PrompterError::MissingScript | PrompterError::EmptyScript)
    }
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, PrompterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_errors_route_to_entry() {
        assert!(PrompterError::MissingScript.needs_script_entry());
        assert!(PrompterError::EmptyScript.needs_script_entry());
        assert!(!PrompterError::Config("bad".into()).needs_script_entry());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PrompterError::EmptyScript.to_string(), "script contains no words");
        assert_eq!(
            PrompterError::Config("speed".into()).to_string(),
            "invalid config: speed"
        );
    }
}
