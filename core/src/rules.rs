//! Rule table: every composition relationship as an explicit entry.
//!
//! Entries map `(ContextKey, key letter)` to a target glyph. There is no
//! generic toggle; a cycle of N states is N pair entries.

use crate::error::TableError;
use crate::glyph::Glyph;
use ahash::AHashMap;
use std::fmt;
use std::str::FromStr;

/// What a rule entry is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextKey {
    /// Nothing relevant precedes the cursor.
    NoContext,
    /// Any glyph classified as a consonant.
    AnyConsonant,
    /// One specific preceding glyph (possibly several code points).
    Glyph(Glyph),
}

impl ContextKey {
    /// Parse the textual form: empty for `NoContext`, `*` for `AnyConsonant`,
    /// anything else is a glyph.
    pub fn parse(text: &str) -> Self {
        match text {
            "" => ContextKey::NoContext,
            "*" => ContextKey::AnyConsonant,
            g => ContextKey::Glyph(Glyph::new(g)),
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::NoContext => Ok(()),
            ContextKey::AnyConsonant => f.write_str("*"),
            ContextKey::Glyph(g) => write!(f, "{}", g),
        }
    }
}

/// Conceptual grouping of rule entries, used for listing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleFamily {
    /// Aspirate, nukta and modifier cycles.
    Cycle,
    /// Two-glyph conjunct ligatures.
    Conjunct,
    /// Vowel lengthening and diphthong pairs.
    Vriddhi,
    /// Consonant + vowel key → matra.
    Matra,
    /// Vowel key with no context → independent vowel.
    Swar,
}

impl RuleFamily {
    pub const ALL: [RuleFamily; 5] = [
        RuleFamily::Cycle,
        RuleFamily::Conjunct,
        RuleFamily::Vriddhi,
        RuleFamily::Matra,
        RuleFamily::Swar,
    ];

    /// Family for an ad hoc entry, judged from its context alone.
    pub fn infer(context: &ContextKey) -> Self {
        match context {
            ContextKey::NoContext => RuleFamily::Swar,
            ContextKey::AnyConsonant => RuleFamily::Matra,
            ContextKey::Glyph(g) if g.width() > 1 && g.as_str().ends_with('\u{094D}') => {
                RuleFamily::Conjunct
            }
            ContextKey::Glyph(_) => RuleFamily::Cycle,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleFamily::Cycle => "cycle",
            RuleFamily::Conjunct => "conjunct",
            RuleFamily::Vriddhi => "vriddhi",
            RuleFamily::Matra => "matra",
            RuleFamily::Swar => "swar",
        }
    }
}

impl FromStr for RuleFamily {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleFamily::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TableError::UnknownFamily(s.to_string()))
    }
}

/// A single rule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub context: ContextKey,
    pub key: char,
    pub target: Glyph,
    pub family: RuleFamily,
}

impl Rule {
    pub fn new(context: ContextKey, key: char, target: &str, family: RuleFamily) -> Self {
        Self {
            context,
            key,
            target: Glyph::new(target),
            family,
        }
    }

    /// Parse `"<context>+<key>=<glyph>"`, e.g. `"क+f=ख"`, `"*+i=ि"`, `"+a=अ"`.
    /// The family is inferred from the context.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let malformed = || TableError::MalformedRule(text.to_string());

        let (lhs, target) = text.trim().split_once('=').ok_or_else(malformed)?;
        let (context, key) = lhs.rsplit_once('+').ok_or_else(malformed)?;

        let mut key_chars = key.chars();
        let key = match (key_chars.next(), key_chars.next()) {
            (Some(k), None) => k,
            _ => return Err(malformed()),
        };
        if target.is_empty() {
            return Err(malformed());
        }

        let context = ContextKey::parse(context);
        let family = RuleFamily::infer(&context);
        Ok(Rule::new(context, key, target, family))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}={}", self.context, self.key, self.target)
    }
}

/// Immutable-after-construction mapping from `(context, key)` to a glyph.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    map: AHashMap<(ContextKey, char), (Glyph, RuleFamily)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            map: AHashMap::new(),
        }
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, rule: Rule) -> Option<Rule> {
        let Rule {
            context,
            key,
            target,
            family,
        } = rule;
        self.map
            .insert((context.clone(), key), (target, family))
            .map(|(target, family)| Rule {
                context,
                key,
                target,
                family,
            })
    }

    /// Insert entries given as `(context, key, target)` triples in the
    /// textual context form accepted by `ContextKey::parse`.
    pub fn extend_family(&mut self, family: RuleFamily, entries: &[(&str, char, &str)]) {
        for (context, key, target) in entries {
            self.insert(Rule::new(ContextKey::parse(context), *key, target, family));
        }
    }

    pub fn lookup(&self, context: &ContextKey, key: char) -> Option<&Glyph> {
        // Exact-match lookup; ContextKey has no wildcard semantics here
        self.map.get(&(context.clone(), key)).map(|(g, _)| g)
    }

    /// Lookup keyed on a specific preceding glyph.
    pub fn lookup_glyph(&self, glyph: &Glyph, key: char) -> Option<&Glyph> {
        self.lookup(&ContextKey::Glyph(glyph.clone()), key)
    }

    pub fn contains(&self, context: &ContextKey, key: char) -> bool {
        self.lookup(context, key).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All entries, sorted by family, then context, then key.
    pub fn rules(&self) -> Vec<Rule> {
        let mut out: Vec<Rule> = self
            .map
            .iter()
            .map(|((context, key), (target, family))| Rule {
                context: context.clone(),
                key: *key,
                target: target.clone(),
                family: *family,
            })
            .collect();
        out.sort_by(|a, b| {
            (a.family, &a.context, a.key).cmp(&(b.family, &b.context, b.key))
        });
        out
    }

    /// Entry count per family, in `RuleFamily::ALL` order.
    pub fn families(&self) -> Vec<(RuleFamily, usize)> {
        RuleFamily::ALL
            .into_iter()
            .map(|fam| (fam, self.map.values().filter(|(_, f)| *f == fam).count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_forms() {
        let r = Rule::parse("क+f=ख").unwrap();
        assert_eq!(r.context, ContextKey::Glyph(Glyph::from("क")));
        assert_eq!(r.key, 'f');
        assert_eq!(r.target.as_str(), "ख");
        assert_eq!(r.family, RuleFamily::Cycle);

        let r = Rule::parse("*+i=ि").unwrap();
        assert_eq!(r.context, ContextKey::AnyConsonant);
        assert_eq!(r.family, RuleFamily::Matra);

        let r = Rule::parse("+a=अ").unwrap();
        assert_eq!(r.context, ContextKey::NoContext);
        assert_eq!(r.family, RuleFamily::Swar);

        let r = Rule::parse("क्+s=क्ष").unwrap();
        assert_eq!(r.family, RuleFamily::Conjunct);
        assert_eq!(r.to_string(), "क्+s=क्ष");
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "क", "क+f", "क+ff=ख", "क+=ख", "क+f="] {
            assert!(
                matches!(Rule::parse(bad), Err(TableError::MalformedRule(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn insert_replaces_and_reports() {
        let mut t = RuleTable::new();
        assert!(t.insert(Rule::parse("ड+f=ढ").unwrap()).is_none());
        let old = t.insert(Rule::parse("ड+f=ड़").unwrap()).unwrap();
        assert_eq!(old.target.as_str(), "ढ");
        assert_eq!(t.len(), 1);
        assert_eq!(
            t.lookup_glyph(&Glyph::from("ड"), 'f'),
            Some(&Glyph::from("ड़"))
        );
    }

    #[test]
    fn family_counts_and_listing() {
        let mut t = RuleTable::new();
        t.extend_family(RuleFamily::Swar, &[("", 'a', "अ"), ("", 'i', "इ")]);
        t.extend_family(RuleFamily::Matra, &[("*", 'i', "ि")]);
        let counts = t.families();
        assert_eq!(counts[0], (RuleFamily::Cycle, 0));
        assert!(counts.contains(&(RuleFamily::Swar, 2)));
        assert!(counts.contains(&(RuleFamily::Matra, 1)));
        let listed = t.rules();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].family, RuleFamily::Matra);
    }

    #[test]
    fn family_names_round_trip() {
        assert_eq!("Conjunct".parse::<RuleFamily>().unwrap(), RuleFamily::Conjunct);
        assert!("ligature".parse::<RuleFamily>().is_err());
    }
}
