//! Script tokenizing
//!
//! A script is the raw text plus the word sequence derived from it. Indices into
//! the word sequence are the unit of playback.

use std::sync::Arc;

use crate::error::{PrompterError, Result};

/// Split text into words on runs of whitespace, dropping empty pieces
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// An immutable, non-empty word sequence
///
/// Replacing a script builds a new value; nothing is merged or diffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    text: String,
    words: Arc<[String]>,
}

impl Script {
    /// Tokenize `text`, failing when it holds no words
    pub fn parse(text: &str) -> Result<Self> {
        let words = tokenize(text);
        if words.is_empty() {
            return Err(PrompterError::EmptyScript);
        }
        Ok(Self {
            text: text.to_string(),
            words: words.into(),
        })
    }

    /// Build from an optional source, distinguishing "missing" from "empty"
    pub fn from_source(text: Option<&str>) -> Result<Self> {
        match text {
            Some(text) => Self::parse(text),
            None => Err(PrompterError::MissingScript),
        }
    }

    /// Raw text as supplied, used to seed edit sessions
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Shared handle to the words for snapshots
    pub fn shared_words(&self) -> Arc<[String]> {
        Arc::clone(&self.words)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Number of words, always at least one
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept so `len` has its usual companion
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.words.len() - 1
    }
}
