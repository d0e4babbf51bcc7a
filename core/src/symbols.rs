//! Symbol tables: the static glyph inventory of a script.
//!
//! Every registered glyph belongs to exactly one `GlyphClass`. Membership is
//! stored in a single map, so a glyph can never be classified twice; the
//! builder rejects attempts to register a glyph under a second class.

use crate::error::TableError;
use crate::glyph::Glyph;
use crate::key::PunctKind;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Disjoint classes a glyph can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphClass {
    Consonant,
    IndependentVowel,
    Matra,
    Modifier,
}

/// Read-only glyph inventory used by the context resolver and the engine.
#[derive(Debug, Clone, Default)]
pub struct SymbolTables {
    base_consonants: AHashMap<char, Glyph>,
    classes: AHashMap<Glyph, GlyphClass>,
    punctuation: AHashMap<PunctKind, Glyph>,
    vowel_triggers: AHashSet<char>,
    nukta: Option<char>,
}

impl SymbolTables {
    pub fn builder() -> SymbolTablesBuilder {
        SymbolTablesBuilder::default()
    }

    /// Class of a glyph, or `None` if it is not part of the inventory.
    pub fn classify(&self, glyph: &str) -> Option<GlyphClass> {
        self.classes.get(glyph).copied()
    }

    /// Glyph entered by a plain consonant key.
    pub fn consonant_for(&self, letter: char) -> Option<&Glyph> {
        self.base_consonants.get(&letter)
    }

    pub fn punctuation(&self, kind: PunctKind) -> Option<&Glyph> {
        self.punctuation.get(&kind)
    }

    /// Whether the letter produces a vowel sound or vowel sign.
    pub fn is_vowel_trigger(&self, letter: char) -> bool {
        self.vowel_triggers.contains(&letter)
    }

    /// The nukta mark, if the script has one.
    pub fn nukta(&self) -> Option<char> {
        self.nukta
    }

    pub fn is_nukta(&self, ch: char) -> bool {
        self.nukta == Some(ch)
    }

    /// All glyphs of one class, sorted.
    pub fn glyphs_of(&self, class: GlyphClass) -> Vec<&Glyph> {
        let mut out: Vec<&Glyph> = self
            .classes
            .iter()
            .filter(|(_, c)| **c == class)
            .map(|(g, _)| g)
            .collect();
        out.sort();
        out
    }

    /// Consonant key bindings, sorted by key.
    pub fn consonant_keys(&self) -> Vec<(char, &Glyph)> {
        let mut out: Vec<(char, &Glyph)> =
            self.base_consonants.iter().map(|(k, g)| (*k, g)).collect();
        out.sort_by_key(|(k, _)| *k);
        out
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Incremental builder for `SymbolTables`.
///
/// Errors are collected and reported by `build`, so table definitions can be
/// written as a flat chain of calls.
#[derive(Debug, Default)]
pub struct SymbolTablesBuilder {
    tables: SymbolTables,
    error: Option<TableError>,
}

impl SymbolTablesBuilder {
    /// Bind a consonant key. The glyph is registered as a consonant.
    pub fn consonant(mut self, letter: char, glyph: &str) -> Self {
        let glyph = Glyph::new(glyph);
        self.register(glyph.clone(), GlyphClass::Consonant);
        self.tables.base_consonants.insert(letter, glyph);
        self
    }

    /// Register consonants that are only reachable through rules.
    pub fn derived_consonants(mut self, glyphs: &[&str]) -> Self {
        for g in glyphs {
            self.register(Glyph::new(g), GlyphClass::Consonant);
        }
        self
    }

    pub fn independent_vowels(mut self, glyphs: &[&str]) -> Self {
        for g in glyphs {
            self.register(Glyph::new(g), GlyphClass::IndependentVowel);
        }
        self
    }

    pub fn matras(mut self, glyphs: &[&str]) -> Self {
        for g in glyphs {
            self.register(Glyph::new(g), GlyphClass::Matra);
        }
        self
    }

    pub fn modifiers(mut self, glyphs: &[&str]) -> Self {
        for g in glyphs {
            self.register(Glyph::new(g), GlyphClass::Modifier);
        }
        self
    }

    /// Bind a punctuation key kind to its glyph. The glyph is a modifier.
    pub fn punctuation(mut self, kind: PunctKind, glyph: &str) -> Self {
        let glyph = Glyph::new(glyph);
        self.register(glyph.clone(), GlyphClass::Modifier);
        self.tables.punctuation.insert(kind, glyph);
        self
    }

    pub fn vowel_triggers(mut self, letters: &str) -> Self {
        self.tables.vowel_triggers.extend(letters.chars());
        self
    }

    /// Set the nukta mark. It is registered as a modifier.
    pub fn nukta(mut self, mark: char) -> Self {
        self.register(Glyph::from(mark), GlyphClass::Modifier);
        self.tables.nukta = Some(mark);
        self
    }

    fn register(&mut self, glyph: Glyph, class: GlyphClass) {
        if self.error.is_some() {
            return;
        }
        if glyph.is_empty() {
            self.error = Some(TableError::EmptyGlyph);
            return;
        }
        match self.tables.classes.get(&glyph) {
            Some(existing) if *existing != class => {
                self.error = Some(TableError::Overlap {
                    glyph: glyph.to_string(),
                    existing: *existing,
                    requested: class,
                });
            }
            Some(_) => {}
            None => {
                self.tables.classes.insert(glyph, class);
            }
        }
    }

    pub fn build(self) -> Result<SymbolTables, TableError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        for letter in self.tables.base_consonants.keys() {
            if self.tables.vowel_triggers.contains(letter) {
                return Err(TableError::KeyConflict(*letter));
            }
        }
        tracing::debug!(
            glyphs = self.tables.classes.len(),
            consonant_keys = self.tables.base_consonants.len(),
            "symbol tables built"
        );
        Ok(self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> SymbolTables {
        SymbolTables::builder()
            .consonant('k', "क")
            .derived_consonants(&["ख"])
            .independent_vowels(&["अ", "इ"])
            .matras(&["ा", "ि"])
            .modifiers(&["ं"])
            .punctuation(PunctKind::Danda, "।")
            .nukta('\u{093C}')
            .vowel_triggers("ai")
            .build()
            .expect("tiny tables")
    }

    #[test]
    fn classes_are_disjoint() {
        let t = tiny();
        assert_eq!(t.classify("क"), Some(GlyphClass::Consonant));
        assert_eq!(t.classify("ख"), Some(GlyphClass::Consonant));
        assert_eq!(t.classify("अ"), Some(GlyphClass::IndependentVowel));
        assert_eq!(t.classify("ि"), Some(GlyphClass::Matra));
        assert_eq!(t.classify("।"), Some(GlyphClass::Modifier));
        assert_eq!(t.classify("\u{093C}"), Some(GlyphClass::Modifier));
        assert_eq!(t.classify("x"), None);
    }

    #[test]
    fn overlap_is_rejected() {
        let err = SymbolTables::builder()
            .independent_vowels(&["अ"])
            .matras(&["अ"])
            .build()
            .unwrap_err();
        assert!(matches!(err, TableError::Overlap { .. }));
    }

    #[test]
    fn consonant_key_cannot_be_vowel_trigger() {
        let err = SymbolTables::builder()
            .consonant('a', "क")
            .vowel_triggers("a")
            .build()
            .unwrap_err();
        assert_eq!(err, TableError::KeyConflict('a'));
    }

    #[test]
    fn empty_glyph_is_rejected() {
        let err = SymbolTables::builder().matras(&[""]).build().unwrap_err();
        assert_eq!(err, TableError::EmptyGlyph);
    }

    #[test]
    fn lookups() {
        let t = tiny();
        assert_eq!(t.consonant_for('k').map(Glyph::as_str), Some("क"));
        assert!(t.consonant_for('x').is_none());
        assert!(t.is_vowel_trigger('a'));
        assert!(!t.is_vowel_trigger('k'));
        assert!(t.is_nukta('\u{093C}'));
        assert_eq!(t.glyphs_of(GlyphClass::Matra).len(), 2);
    }
}
