//! Devanagari symbol inventory and composition rules.
//!
//! Keys follow a phonetic Latin layout: one key per unaspirated consonant,
//! `f` cycles a consonant through its aspirated / sibilant / nasal / nukta
//! variants, vowel keys attach matras after a consonant and lengthen or
//! combine a preceding vowel.

use libdevanagari_core::{PunctKind, RuleFamily, RuleTable, SymbolTables, TableError};
use phf::phf_map;

use crate::config::{RetroflexCycle, SanskritConfig};

pub const NUKTA: char = '\u{093C}';
pub const VIRAMA: &str = "\u{094D}";

/// Letters that produce vowel sounds (the virama key is added at build time).
pub const VOWEL_KEYS: &str = "aiueoz";

/// Plain consonant keys.
pub static BASE_CONSONANTS: phf::Map<char, &'static str> = phf_map! {
    'k' => "क", 'g' => "ग", 'c' => "च", 'j' => "ज", 't' => "त",
    'd' => "द", 'n' => "न", 'p' => "प", 'b' => "ब", 'm' => "म",
    'y' => "य", 'x' => "ट", 'v' => "ड", 'w' => "व",
    'r' => "र", 'l' => "ल", 's' => "स", 'h' => "ह",
};

/// Consonants only reachable through the cycle key.
pub const DERIVED_CONSONANTS: &[&str] = &[
    "ख", "घ", "छ", "झ", "थ", "ध", "फ", "भ", "ठ", "ढ",
    "\u{0921}\u{093C}", // ड़
    "\u{0922}\u{093C}", // ढ़
    "ष", "श", "ञ", "ण", "ङ",
    // Conjunct ligatures. Only classified as rule targets: the resolver reads
    // one unit, so after a ligature it sees the final ष or ञ.
    "क्ष", "ज्ञ",
];

pub const SWARS: &[&str] = &["अ", "आ", "इ", "ई", "उ", "ऊ", "ए", "ऐ", "ओ", "औ", "ऋ", "ॠ"];

pub const MATRAS: &[&str] = &["ा", "ि", "ी", "ु", "ू", "े", "ै", "ो", "ौ", "ृ", "ॄ"];

/// Modifiers not bound to a punctuation key.
pub const MODIFIERS: &[&str] = &["ँ", VIRAMA];

/// Aspirate, sibilant and nasal cycles.
const CONSONANT_CYCLES: &[(&str, char, &str)] = &[
    ("क", 'f', "ख"), ("ख", 'f', "क"),
    ("ग", 'f', "घ"), ("घ", 'f', "ग"),
    ("च", 'f', "छ"), ("छ", 'f', "च"),
    ("ज", 'f', "झ"), ("झ", 'f', "ज"),
    ("त", 'f', "थ"), ("थ", 'f', "त"),
    ("द", 'f', "ध"), ("ध", 'f', "द"),
    ("प", 'f', "फ"), ("फ", 'f', "प"),
    ("ब", 'f', "भ"), ("भ", 'f', "ब"),
    ("ट", 'f', "ठ"), ("ठ", 'f', "ट"),
    ("स", 'f', "ष"), ("ष", 'f', "श"), ("श", 'f', "स"),
    ("न", 'f', "ञ"), ("ञ", 'f', "ण"), ("ण", 'f', "ङ"), ("ङ", 'f', "न"),
];

const RETROFLEX_TWO_STATE: &[(&str, char, &str)] = &[("ड", 'f', "ढ"), ("ढ", 'f', "ड")];

const RETROFLEX_FOUR_STATE: &[(&str, char, &str)] = &[
    ("ड", 'f', "ढ"),
    ("ढ", 'f', "\u{0921}\u{093C}"),
    ("\u{0921}\u{093C}", 'f', "\u{0922}\u{093C}"),
    ("\u{0922}\u{093C}", 'f', "ड"),
];

const MODIFIER_CYCLE: &[(&str, char, &str)] = &[("ं", 'f', "ँ"), ("ँ", 'f', "ं")];

const SWAR_RULES: &[(&str, char, &str)] = &[
    ("", 'a', "अ"),
    ("", 'i', "इ"),
    ("", 'u', "उ"),
    ("", 'e', "ए"),
    ("", 'o', "ओ"),
    ("", 'z', "ऋ"),
];

/// Lengthening and diphthong pairs, for independent vowels and matras alike.
const VRIDDHI_RULES: &[(&str, char, &str)] = &[
    ("अ", 'a', "आ"), ("इ", 'i', "ई"), ("उ", 'u', "ऊ"), ("ऋ", 'z', "ॠ"),
    ("अ", 'i', "ऐ"), ("अ", 'u', "औ"),
    ("ा", 'a', "ा"), ("ि", 'i', "ी"), ("ु", 'u', "ू"), ("ृ", 'z', "ॄ"),
    ("ा", 'i', "ै"), ("ा", 'u', "ौ"),
];

const MATRA_RULES: &[(&str, char, &str)] = &[
    ("*", 'a', "ा"),
    ("*", 'i', "ि"),
    ("*", 'u', "ु"),
    ("*", 'e', "े"),
    ("*", 'o', "ो"),
    ("*", 'z', "ृ"),
];

/// Consonant + virama + key collapsing into a ligature.
const CONJUNCT_RULES: &[(&str, char, &str)] = &[
    ("क\u{094D}", 's', "क्ष"),
    ("ज\u{094D}", 'n', "ज्ञ"),
];

/// Build the glyph inventory. The virama key joins the vowel triggers so it
/// attaches after a consonant like a matra.
pub fn symbol_tables(virama_key: char) -> Result<SymbolTables, TableError> {
    let mut builder = SymbolTables::builder();
    for (letter, glyph) in BASE_CONSONANTS.entries() {
        builder = builder.consonant(*letter, glyph);
    }
    let mut triggers = VOWEL_KEYS.to_string();
    triggers.push(virama_key);

    builder
        .derived_consonants(DERIVED_CONSONANTS)
        .independent_vowels(SWARS)
        .matras(MATRAS)
        .modifiers(MODIFIERS)
        .punctuation(PunctKind::Anusvara, "ं")
        .punctuation(PunctKind::Visarga, "ः")
        .punctuation(PunctKind::Danda, "।")
        .nukta(NUKTA)
        .vowel_triggers(&triggers)
        .build()
}

/// Build the rule table for a configuration, including its extra rules.
pub fn rule_table(config: &SanskritConfig) -> Result<RuleTable, TableError> {
    let mut table = RuleTable::new();

    table.extend_family(RuleFamily::Cycle, CONSONANT_CYCLES);
    match config.retroflex_cycle {
        RetroflexCycle::TwoState => table.extend_family(RuleFamily::Cycle, RETROFLEX_TWO_STATE),
        RetroflexCycle::FourState => table.extend_family(RuleFamily::Cycle, RETROFLEX_FOUR_STATE),
    }
    table.extend_family(RuleFamily::Cycle, MODIFIER_CYCLE);
    table.extend_family(RuleFamily::Swar, SWAR_RULES);
    table.extend_family(RuleFamily::Vriddhi, VRIDDHI_RULES);
    table.extend_family(RuleFamily::Matra, MATRA_RULES);
    table.extend_family(RuleFamily::Matra, &[("*", config.virama_key, VIRAMA)]);
    if config.base.conjunct_ligatures {
        table.extend_family(RuleFamily::Conjunct, CONJUNCT_RULES);
    }

    config.base.apply_extra_rules(&mut table)?;
    tracing::debug!(
        rules = table.len(),
        retroflex = ?config.retroflex_cycle,
        "rule table built"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libdevanagari_core::{ContextKey, ContextResolver, Glyph, GlyphClass, PrecedingContext};

    #[test]
    fn every_rule_glyph_is_classified() {
        let tables = symbol_tables('q').unwrap();
        let rules = rule_table(&SanskritConfig::default()).unwrap();
        for rule in rules.rules() {
            if let ContextKey::Glyph(g) = &rule.context {
                assert!(tables.classify(g.as_str()).is_some(), "unclassified context {}", g);
            }
            assert!(
                tables.classify(rule.target.as_str()).is_some(),
                "unclassified target {}",
                rule.target
            );
        }
    }

    #[test]
    fn inventory_classes() {
        let tables = symbol_tables('q').unwrap();
        assert_eq!(tables.classify("\u{0921}\u{093C}"), Some(GlyphClass::Consonant));
        assert_eq!(tables.classify("\u{095C}"), None); // raw precomposed form is never looked up
        assert_eq!(tables.classify(Glyph::new("\u{095C}").as_str()), Some(GlyphClass::Consonant));
        assert_eq!(tables.classify(VIRAMA), Some(GlyphClass::Modifier));
        assert_eq!(tables.classify("ः"), Some(GlyphClass::Modifier));
        assert_eq!(tables.glyphs_of(GlyphClass::IndependentVowel).len(), SWARS.len());
        assert_eq!(tables.consonant_keys().len(), BASE_CONSONANTS.len());
    }

    #[test]
    fn ligature_tail_resolves_as_its_final_consonant() {
        let tables = symbol_tables('q').unwrap();
        let resolver = ContextResolver::new(&tables).with_cluster_window(true);
        let lookback = resolver.resolve("क्ष");
        assert_eq!(lookback.context, PrecedingContext::Consonant(Glyph::from("ष")));
        assert_eq!(lookback.cluster, Some(Glyph::from("\u{094D}ष")));
        assert_eq!(resolver.resolve("ज्ञ").context, PrecedingContext::Consonant(Glyph::from("ञ")));
    }

    #[test]
    fn virama_key_may_not_shadow_a_consonant() {
        assert_eq!(symbol_tables('k').unwrap_err(), TableError::KeyConflict('k'));
    }

    #[test]
    fn conjuncts_only_when_enabled() {
        let mut config = SanskritConfig::default();
        let without = rule_table(&config).unwrap();
        assert!(without.families().contains(&(RuleFamily::Conjunct, 0)));
        config.base.conjunct_ligatures = true;
        let with = rule_table(&config).unwrap();
        assert!(with.families().contains(&(RuleFamily::Conjunct, 2)));
    }
}
