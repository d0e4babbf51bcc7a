//! libdevanagari-core
//!
//! Script-agnostic composition machinery shared by language crates
//! (libsanskrit).
//!
//! A keystroke flows through four stages:
//! key event → `KeyClassifier` → `ContextResolver` (buffer tail) →
//! `CompositionEngine` → `CompositionAction` applied by the host.
//!
//! Public API:
//! - `Glyph` - NFC-normalized output unit
//! - `SymbolTables` - disjoint glyph inventory (consonants, vowels, matras, modifiers)
//! - `RuleTable` - `(ContextKey, key) → Glyph` composition entries
//! - `ContextResolver` - classifies the glyph before the cursor
//! - `KeyClassifier` - raw key events to `SymbolicKey`
//! - `CompositionEngine` - the priority-ordered decision procedure
//! - `ImeEngine` / `InputBuffer` - reference host applying actions to text
//! - `Config` - configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::TableError;

pub mod glyph;
pub use glyph::Glyph;

pub mod symbols;
pub use symbols::{GlyphClass, SymbolTables, SymbolTablesBuilder};

pub mod rules;
pub use rules::{ContextKey, Rule, RuleFamily, RuleTable};

pub mod context;
pub use context::{ContextResolver, Lookback, PrecedingContext, LOOKBACK};

pub mod key;
pub use key::{KeyClassifier, KeyEvent, PunctKind, PunctuationKeys, SymbolicKey};

pub mod engine;
pub use engine::{CompositionAction, CompositionEngine, RuleOrder, RuleStep};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod ime_engine;
pub use ime_engine::{ImeEngine, KeyResult};

/// Generic configuration for the composition core.
///
/// This config contains only script-agnostic fields. Script-specific options
/// (cycle variants, virama key, etc.) belong in the language crate's config,
/// which flattens this one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Priority ordering of the rule classes
    pub rule_order: RuleOrder,

    /// Enable two-glyph conjunct ligature rules
    pub conjunct_ligatures: bool,

    /// Insert the raw key when no rule handles it (default text behavior)
    pub literal_fallback: bool,

    /// Extra rule entries in the form "<context>+<key>=<glyph>".
    /// Context is a glyph, "*" for any consonant, or empty for none.
    /// Entries override built-in rules with the same context and key.
    pub extra_rules: Vec<String>,

    // Tables last so TOML output stays valid
    /// Characters bound to the visarga, danda and anusvara keys
    pub punctuation_keys: PunctuationKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule_order: RuleOrder::ShiftFirst,
            conjunct_ligatures: false,
            literal_fallback: true,
            extra_rules: vec![],
            punctuation_keys: PunctuationKeys::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse `extra_rules`. Fails on the first malformed entry.
    pub fn parse_extra_rules(&self) -> Result<Vec<Rule>, TableError> {
        self.extra_rules.iter().map(|s| Rule::parse(s)).collect()
    }

    /// Merge `extra_rules` into a table, overriding existing entries.
    pub fn apply_extra_rules(&self, table: &mut RuleTable) -> Result<(), TableError> {
        for rule in self.parse_extra_rules()? {
            if let Some(old) = table.insert(rule.clone()) {
                tracing::debug!(old = %old, new = %rule, "extra rule overrides built-in");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_and_defaults() {
        let mut cfg = Config::default();
        cfg.rule_order = RuleOrder::LockFirst;
        cfg.extra_rules.push("क+x=क्ष".to_string());
        let text = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back, cfg);

        let partial = Config::from_toml_str("conjunct_ligatures = true").unwrap();
        assert!(partial.conjunct_ligatures);
        assert_eq!(partial.rule_order, RuleOrder::ShiftFirst);
        assert!(partial.literal_fallback);
    }

    #[test]
    fn punctuation_keys_from_toml() {
        let cfg = Config::from_toml_str(
            "[punctuation_keys]\nvisarga = ':'\ndanda = '|'\nanusvara = '.'\n",
        )
        .unwrap();
        assert_eq!(cfg.punctuation_keys.visarga, ':');
        assert_eq!(cfg.punctuation_keys.danda, '|');
    }

    #[test]
    fn extra_rules_override() {
        let mut table = RuleTable::new();
        table.extend_family(RuleFamily::Cycle, &[("ड", 'f', "ढ")]);
        let cfg = Config {
            extra_rules: vec!["ड+f=ड़".into()],
            ..Config::default()
        };
        cfg.apply_extra_rules(&mut table).unwrap();
        assert_eq!(table.lookup_glyph(&Glyph::from("ड"), 'f'), Some(&Glyph::from("ड़")));

        let bad = Config {
            extra_rules: vec!["nonsense".into()],
            ..Config::default()
        };
        assert!(bad.apply_extra_rules(&mut table).is_err());
    }
}
