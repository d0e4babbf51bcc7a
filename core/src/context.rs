//! Preceding-glyph context for composition.
//!
//! The context is re-derived from the text before the cursor on every
//! keystroke. The buffer tail is split into glyph units: one character, or a
//! base character followed by the nukta mark, which together form a single
//! nukta consonant. Only the last unit is classified; the one before it is
//! read for the conjunct window and for unit-to-character bookkeeping.

use crate::glyph::Glyph;
use crate::symbols::{GlyphClass, SymbolTables};

/// Maximum number of glyph units the resolver ever inspects.
pub const LOOKBACK: usize = 2;

/// Classification of the glyph immediately before the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrecedingContext {
    /// Start of buffer
    #[default]
    None,
    Consonant(Glyph),
    IndependentVowel(Glyph),
    Matra(Glyph),
    /// Modifiers, punctuation and anything outside the inventory
    Other(Glyph),
}

impl PrecedingContext {
    pub fn glyph(&self) -> Option<&Glyph> {
        match self {
            PrecedingContext::None => None,
            PrecedingContext::Consonant(g)
            | PrecedingContext::IndependentVowel(g)
            | PrecedingContext::Matra(g)
            | PrecedingContext::Other(g) => Some(g),
        }
    }

    pub fn is_consonant(&self) -> bool {
        matches!(self, PrecedingContext::Consonant(_))
    }
}

/// Result of resolving the buffer tail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lookback {
    pub context: PrecedingContext,
    /// The last two glyph units joined, reported only when the two-glyph
    /// conjunct window is enabled.
    pub cluster: Option<Glyph>,
    /// Buffer characters covered by the last `LOOKBACK` units, nearest first.
    /// Zero where the buffer holds no such unit.
    ///
    /// These count the text as it was read, which can differ from the
    /// normalized glyph width (U+095C is one character but decomposes to two).
    pub spans: [usize; LOOKBACK],
}

impl Lookback {
    /// Lookback for a bare context, assuming its glyph sits in the buffer in
    /// normalized form.
    pub fn new(context: PrecedingContext) -> Self {
        let span = context.glyph().map_or(0, Glyph::width);
        Self {
            context,
            cluster: None,
            spans: [span, 0],
        }
    }

    /// Buffer characters covered by the last `units` glyph units, or `None`
    /// if the resolved tail holds fewer units than that.
    pub fn chars_for(&self, units: usize) -> Option<usize> {
        if units == 0 || units > LOOKBACK {
            return None;
        }
        let spans = &self.spans[..units];
        if spans.contains(&0) {
            return None;
        }
        Some(spans.iter().sum())
    }
}

impl From<PrecedingContext> for Lookback {
    fn from(context: PrecedingContext) -> Self {
        Lookback::new(context)
    }
}

/// Pure function of the symbol tables and the text before the cursor.
#[derive(Debug, Clone, Copy)]
pub struct ContextResolver<'a> {
    tables: &'a SymbolTables,
    cluster_window: bool,
}

impl<'a> ContextResolver<'a> {
    pub fn new(tables: &'a SymbolTables) -> Self {
        Self {
            tables,
            cluster_window: false,
        }
    }

    /// Also report the two-glyph window used by conjunct rules.
    pub fn with_cluster_window(mut self, enabled: bool) -> Self {
        self.cluster_window = enabled;
        self
    }

    /// Resolve the context from `before_cursor`, which must be the complete
    /// text preceding the insertion point (or at least its last
    /// `2 * LOOKBACK` characters).
    pub fn resolve(&self, before_cursor: &str) -> Lookback {
        let tail: Vec<char> = before_cursor.chars().rev().take(2 * LOOKBACK).collect();
        let last = match self.unit(&tail) {
            Some(unit) => unit,
            None => return Lookback::default(),
        };
        let prev = self.unit(&tail[last.len()..]);

        let context = self.classify(Glyph::from_chars(last.iter().rev().copied()));
        let cluster = match prev {
            Some(p) if self.cluster_window => Some(Glyph::from_chars(
                p.iter().rev().chain(last.iter().rev()).copied(),
            )),
            _ => None,
        };
        Lookback {
            context,
            cluster,
            spans: [last.len(), prev.map_or(0, <[char]>::len)],
        }
    }

    /// Trailing glyph unit of `rev`, which holds buffer characters in
    /// reverse order.
    fn unit<'t>(&self, rev: &'t [char]) -> Option<&'t [char]> {
        match rev {
            [] => None,
            [mark, _, ..] if self.tables.is_nukta(*mark) => Some(&rev[..2]),
            _ => Some(&rev[..1]),
        }
    }

    fn classify(&self, unit: Glyph) -> PrecedingContext {
        match self.tables.classify(unit.as_str()) {
            Some(GlyphClass::Consonant) => PrecedingContext::Consonant(unit),
            Some(GlyphClass::IndependentVowel) => PrecedingContext::IndependentVowel(unit),
            Some(GlyphClass::Matra) => PrecedingContext::Matra(unit),
            Some(GlyphClass::Modifier) | None => PrecedingContext::Other(unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUKTA: char = '\u{093C}';

    fn tables() -> SymbolTables {
        SymbolTables::builder()
            .consonant('v', "ड")
            .consonant('k', "क")
            .derived_consonants(&["ड़"])
            .independent_vowels(&["अ"])
            .matras(&["ा"])
            .modifiers(&["्"])
            .nukta(NUKTA)
            .build()
            .expect("tables")
    }

    #[test]
    fn empty_buffer_has_no_context() {
        let t = tables();
        let r = ContextResolver::new(&t).resolve("");
        assert_eq!(r.context, PrecedingContext::None);
        assert_eq!(r.cluster, None);
        assert_eq!(r.chars_for(1), None);
    }

    #[test]
    fn classifies_last_glyph() {
        let t = tables();
        let r = ContextResolver::new(&t);
        assert_eq!(
            r.resolve("अक").context,
            PrecedingContext::Consonant(Glyph::from("क"))
        );
        assert_eq!(
            r.resolve("क अ").context,
            PrecedingContext::IndependentVowel(Glyph::from("अ"))
        );
        assert_eq!(
            r.resolve("का").context,
            PrecedingContext::Matra(Glyph::from("ा"))
        );
        assert_eq!(
            r.resolve("x ").context,
            PrecedingContext::Other(Glyph::from(" "))
        );
    }

    #[test]
    fn nukta_pair_is_one_unit() {
        let t = tables();
        let text: String = ['क', 'ड', NUKTA].iter().collect();
        let r = ContextResolver::new(&t).with_cluster_window(true).resolve(&text);
        assert_eq!(r.context, PrecedingContext::Consonant(Glyph::from("ड़")));
        assert_eq!(r.spans, [2, 1]);
        assert_eq!(r.chars_for(1), Some(2));
        assert_eq!(r.chars_for(2), Some(3));
        assert_eq!(r.cluster, Some(Glyph::from_chars(['क', 'ड', NUKTA])));
    }

    #[test]
    fn precomposed_nukta_letter_spans_one_char() {
        let t = tables();
        let r = ContextResolver::new(&t).resolve("क\u{095C}");
        assert_eq!(r.context, PrecedingContext::Consonant(Glyph::from("ड़")));
        assert_eq!(r.spans, [1, 1]);
        assert_eq!(r.chars_for(1), Some(1));
    }

    #[test]
    fn nukta_pair_before_last_unit() {
        let t = tables();
        let text: String = ['ड', NUKTA, '्'].iter().collect();
        let r = ContextResolver::new(&t).with_cluster_window(true).resolve(&text);
        assert_eq!(r.context, PrecedingContext::Other(Glyph::from("्")));
        assert_eq!(r.spans, [1, 2]);
        assert_eq!(r.chars_for(2), Some(3));
        assert_eq!(r.cluster, Some(Glyph::from_chars(['ड', NUKTA, '्'])));
    }

    #[test]
    fn lone_nukta_is_other() {
        let t = tables();
        let r = ContextResolver::new(&t).resolve(&NUKTA.to_string());
        assert_eq!(r.context, PrecedingContext::Other(Glyph::from(NUKTA)));
    }

    #[test]
    fn cluster_window_reports_two_glyphs() {
        let t = tables();
        let off = ContextResolver::new(&t).resolve("क्");
        assert_eq!(off.cluster, None);
        let on = ContextResolver::new(&t).with_cluster_window(true).resolve("क्");
        assert_eq!(on.context, PrecedingContext::Other(Glyph::from("्")));
        assert_eq!(on.cluster, Some(Glyph::from("क्")));
        assert_eq!(on.chars_for(2), Some(2));
        assert_eq!(ContextResolver::new(&t).resolve("्").chars_for(2), None);
    }
}
