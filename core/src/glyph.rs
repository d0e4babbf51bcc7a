//! Glyph values.
//!
//! A `Glyph` is one rendered unit of output: a consonant, an independent
//! vowel, a matra, a modifier, or a consonant carrying a nukta. Glyphs are
//! compared by value. Every glyph is stored NFC-normalized, which keeps
//! nukta letters such as U+095C in their decomposed base + nukta form so the
//! context resolver sees the same code points that land in the text buffer.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Glyph(String);

impl Glyph {
    /// Build a glyph, normalizing to NFC.
    pub fn new<S: AsRef<str>>(text: S) -> Self {
        Self(text.as_ref().nfc().collect())
    }

    /// Build a glyph from a run of buffer characters.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        Self(chars.into_iter().nfc().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of code points in the normalized glyph.
    pub fn width(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last_char(&self) -> Option<char> {
        self.0.chars().next_back()
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Glyph {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Glyph {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<char> for Glyph {
    fn from(ch: char) -> Self {
        Self::from_chars([ch])
    }
}

impl From<Glyph> for String {
    fn from(g: Glyph) -> Self {
        g.0
    }
}

impl AsRef<str> for Glyph {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Glyph {
    fn borrow(&self) -> &str {
        &self.0
    }
}
