//! Text buffer with cursor tracking, standing in for the host's editor.
//!
//! The composition engine never owns text; this buffer is the reference
//! implementation of the host side: it exposes the text before the cursor for
//! context resolution and applies `CompositionAction`s.

use crate::context::Lookback;
use crate::engine::CompositionAction;

/// Text buffer tracking content and cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize, // Byte offset, not char offset
}

impl InputBuffer {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Create a buffer holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    /// Get the full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text preceding the cursor; the context resolver reads its tail.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    /// Get the cursor position (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clear the buffer and reset cursor.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    /// Returns true if a character was deleted.
    pub fn delete_before(&mut self) -> bool {
        match self.text[..self.cursor].char_indices().next_back() {
            Some((prev, _)) => {
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Delete up to `count` characters before the cursor.
    /// Returns the number actually deleted.
    pub fn delete_before_n(&mut self, count: usize) -> usize {
        let mut deleted = 0;
        while deleted < count && self.delete_before() {
            deleted += 1;
        }
        deleted
    }

    /// Delete the character after the cursor (delete key).
    /// Returns true if a character was deleted.
    pub fn delete_after(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Move cursor to the left by one character.
    /// Returns true if cursor moved.
    pub fn move_left(&mut self) -> bool {
        match self.text[..self.cursor].char_indices().next_back() {
            Some((prev, _)) => {
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Move cursor to the right by one character.
    /// Returns true if cursor moved.
    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.cursor += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Move cursor to the beginning.
    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end.
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Set the cursor position (must be at a character boundary).
    pub fn set_cursor(&mut self, pos: usize) -> bool {
        if pos <= self.text.len() && self.text.is_char_boundary(pos) {
            self.cursor = pos;
            true
        } else {
            false
        }
    }

    /// Apply a composition action at the cursor. `lookback` must be the
    /// resolution of the current `before_cursor()` text; it maps the glyph
    /// units of `ReplaceTail` to buffer characters.
    /// Returns false for `Unhandled`, leaving the buffer untouched.
    pub fn apply(&mut self, action: &CompositionAction, lookback: &Lookback) -> bool {
        match action {
            CompositionAction::Insert(glyph) => {
                self.insert_str(glyph.as_str());
                true
            }
            CompositionAction::ReplaceTail(units, glyph) => {
                let chars = lookback.chars_for(*units);
                debug_assert!(chars.is_some(), "replace of {} units past the lookback", units);
                let Some(chars) = chars else {
                    return false;
                };
                let deleted = self.delete_before_n(chars);
                debug_assert_eq!(deleted, chars, "lookback does not match the buffer");
                self.insert_str(glyph.as_str());
                true
            }
            CompositionAction::Unhandled => false,
        }
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
