//! Edit session buffer

/// Editable copy of the script text while edit mode is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    original: String,
    draft: String,
    /// Playback was running when the session opened
    was_playing: bool,
}

impl EditSession {
    pub fn new(text: &str, was_playing: bool) -> Self {
        Self {
            original: text.to_string(),
            draft: text.to_string(),
            was_playing,
        }
    }

    /// Whether cancelling should put playback back where it was
    pub fn resumes_playback(&self) -> bool {
        self.was_playing
    }

    /// Text the session was opened with
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_modified(&self) -> bool {
        self.draft != self.original
    }
}
