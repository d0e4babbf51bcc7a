//! Errors raised while building symbol and rule tables.
//!
//! Composition itself never fails; only table construction and configuration
//! parsing can.

use crate::symbols::GlyphClass;

/// Error building or validating the static tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A glyph was registered in two disjoint classes.
    #[error("glyph '{glyph}' is already a {existing:?}, cannot also be a {requested:?}")]
    Overlap {
        glyph: String,
        existing: GlyphClass,
        requested: GlyphClass,
    },

    /// An empty string was supplied where a glyph was expected.
    #[error("empty glyph")]
    EmptyGlyph,

    /// A textual rule entry could not be parsed.
    #[error("malformed rule '{0}': expected '<context>+<key>=<glyph>'")]
    MalformedRule(String),

    /// A key letter is bound to two incompatible roles.
    #[error("key '{0}' is bound to both a consonant and a vowel sign")]
    KeyConflict(char),

    /// Unknown rule family name.
    #[error("unknown rule family '{0}'")]
    UnknownFamily(String),
}
