//! Word layout - greedy wrapping of script words into terminal rows
//!
//! Positions are in content rows: the row a word sits on, multiplied by the
//! row stride (one text row plus the configured gap). The scroll synchronizer
//! reads them through `LayoutProbe`.

use std::sync::Arc;

use prompter_core::{ElementBounds, LayoutProbe};
use unicode_width::UnicodeWidthStr;

/// Font sizes at or below this render with no gap between rows
const BASE_FONT_SIZE: u16 = 16;

/// Font size increase that adds one blank row between text rows
const FONT_SIZE_PER_GAP: u16 = 8;

/// Largest gap ever inserted between text rows
const MAX_LINE_GAP: u16 = 3;

/// Blank rows between wrapped text rows for a given font size
pub fn line_gap(font_size: u16) -> u16 {
    (font_size.saturating_sub(BASE_FONT_SIZE) / FONT_SIZE_PER_GAP).min(MAX_LINE_GAP)
}

/// Where one word landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSlot {
    /// Wrapped line the word is on
    pub line: usize,
    /// Column offset from the left edge of the area
    pub col: u16,
    /// Display width, truncated to the area width
    pub width: u16,
}

/// Wrapped positions of every word for one area width
#[derive(Debug, Clone, Default)]
pub struct WordLayout {
    words: Option<Arc<[String]>>,
    width: u16,
    viewport_height: u16,
    gap: u16,
    slots: Vec<WordSlot>,
    line_count: usize,
}

impl WordLayout {
    /// Recompute if the words, width or gap changed. Returns true if it did.
    pub fn update(&mut self, words: &Arc<[String]>, width: u16, gap: u16) -> bool {
        let same_words = self
            .words
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, words));
        if same_words && self.width == width && self.gap == gap {
            return false;
        }
        self.words = Some(words.clone());
        self.width = width;
        self.gap = gap;
        self.reflow(words);
        true
    }

    /// Visible rows of the scroll container
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
    }

    fn reflow(&mut self, words: &[String]) {
        self.slots.clear();
        self.line_count = 0;
        if self.width == 0 || words.is_empty() {
            return;
        }

        let mut line = 0;
        let mut col: u16 = 0;
        for word in words {
            let width = (word.width().max(1)).min(self.width as usize) as u16;
            // One space separates words on the same line
            if col > 0 && col as usize + 1 + width as usize > self.width as usize {
                line += 1;
                col = 0;
            } else if col > 0 {
                col += 1;
            }
            self.slots.push(WordSlot { line, col, width });
            col += width;
        }
        self.line_count = line + 1;
    }

    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<WordSlot> {
        self.slots.get(index).copied()
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Content rows per wrapped line
    pub fn stride(&self) -> usize {
        1 + self.gap as usize
    }

    /// Content row a wrapped line starts on
    pub fn line_top(&self, line: usize) -> usize {
        line * self.stride()
    }

    /// Word under a content position, if any
    pub fn word_at(&self, col: u16, content_row: usize) -> Option<usize> {
        if content_row % self.stride() != 0 {
            return None;
        }
        let line = content_row / self.stride();
        self.slots
            .iter()
            .position(|slot| slot.line == line && col >= slot.col && col < slot.col + slot.width)
    }
}

impl LayoutProbe for WordLayout {
    fn container_height(&self) -> f64 {
        self.viewport_height as f64
    }

    fn content_height(&self) -> f64 {
        if self.line_count == 0 {
            return 0.0;
        }
        // The gap after the last line is not content
        (self.line_top(self.line_count - 1) + 1) as f64
    }

    fn element_bounds(&self, index: usize) -> Option<ElementBounds> {
        let slot = self.slot(index)?;
        Some(ElementBounds {
            top: self.line_top(slot.line) as f64,
            height: 1.0,
        })
    }
}
