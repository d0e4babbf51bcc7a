// core/src/engine.rs
//
// Composition engine: (preceding context, symbolic key) -> action.
// Stateless between keystrokes; everything is re-derived from the buffer tail.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::{ContextResolver, Lookback, PrecedingContext};
use crate::glyph::Glyph;
use crate::key::SymbolicKey;
use crate::rules::{ContextKey, RuleTable};
use crate::symbols::SymbolTables;

/// What the host should do with its buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionAction {
    /// Append the glyph at the cursor.
    Insert(Glyph),
    /// Delete the given number of glyph units before the cursor (1 or 2),
    /// then append the glyph. A unit is one character or a nukta pair, as
    /// split by `ContextResolver`; `Lookback::chars_for` gives the matching
    /// character count.
    ReplaceTail(usize, Glyph),
    /// No rule matched; the host applies its default behavior.
    Unhandled,
}

impl CompositionAction {
    pub fn is_handled(&self) -> bool {
        !matches!(self, CompositionAction::Unhandled)
    }

    fn replace(count: usize, glyph: Glyph) -> Self {
        debug_assert!((1..=2).contains(&count), "replace count {} out of range", count);
        CompositionAction::ReplaceTail(count, glyph)
    }
}

/// Priority ordering of the rule classes.
///
/// The two orderings differ only in where the shift-forced vowel check sits
/// relative to the vowel-lock and matra-combination checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    /// Shift always forces a fresh independent vowel.
    #[default]
    ShiftFirst,
    /// Lengthening/diphthong of a preceding vowel or matra wins over shift.
    LockFirst,
}

impl RuleOrder {
    pub fn steps(&self) -> &'static [RuleStep] {
        match self {
            RuleOrder::ShiftFirst => &[
                RuleStep::Punctuation,
                RuleStep::ShiftForced,
                RuleStep::VowelLock,
                RuleStep::MatraCombine,
                RuleStep::Transform,
                RuleStep::MatraAttach,
                RuleStep::BaseEntry,
            ],
            RuleOrder::LockFirst => &[
                RuleStep::Punctuation,
                RuleStep::VowelLock,
                RuleStep::MatraCombine,
                RuleStep::ShiftForced,
                RuleStep::Transform,
                RuleStep::MatraAttach,
                RuleStep::BaseEntry,
            ],
        }
    }
}

/// The rule class that produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleStep {
    Punctuation,
    ShiftForced,
    VowelLock,
    MatraCombine,
    Transform,
    MatraAttach,
    BaseEntry,
}

/// Table-driven composition engine.
///
/// Holds only immutable, shared tables, so it can be cloned cheaply and
/// called from any thread.
#[derive(Debug, Clone)]
pub struct CompositionEngine {
    tables: Arc<SymbolTables>,
    rules: Arc<RuleTable>,
    order: RuleOrder,
    conjuncts: bool,
}

impl CompositionEngine {
    pub fn new(tables: SymbolTables, rules: RuleTable) -> Self {
        Self::from_arc(Arc::new(tables), Arc::new(rules))
    }

    pub fn from_arc(tables: Arc<SymbolTables>, rules: Arc<RuleTable>) -> Self {
        Self {
            tables,
            rules,
            order: RuleOrder::default(),
            conjuncts: false,
        }
    }

    pub fn with_order(mut self, order: RuleOrder) -> Self {
        self.order = order;
        self
    }

    /// Enable two-glyph conjunct rules.
    pub fn with_conjuncts(mut self, enabled: bool) -> Self {
        self.conjuncts = enabled;
        self
    }

    pub fn tables(&self) -> &SymbolTables {
        &self.tables
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn order(&self) -> RuleOrder {
        self.order
    }

    pub fn conjuncts_enabled(&self) -> bool {
        self.conjuncts
    }

    /// Resolver configured for this engine's lookback window.
    pub fn resolver(&self) -> ContextResolver<'_> {
        ContextResolver::new(&self.tables).with_cluster_window(self.conjuncts)
    }

    /// Decide the action for a key given a single-glyph context.
    pub fn compose(&self, context: &PrecedingContext, key: SymbolicKey) -> CompositionAction {
        self.explain(&Lookback::new(context.clone()), key).1
    }

    /// Decide the action for a key given a full lookback window.
    pub fn compose_lookback(&self, lookback: &Lookback, key: SymbolicKey) -> CompositionAction {
        self.explain(lookback, key).1
    }

    /// Resolve the context from the text before the cursor, then compose.
    pub fn process(&self, before_cursor: &str, key: SymbolicKey) -> CompositionAction {
        let lookback = self.resolver().resolve(before_cursor);
        self.compose_lookback(&lookback, key)
    }

    /// Like `compose_lookback`, also reporting which rule class decided.
    /// `None` means the action is `Unhandled`, whether no class matched or a
    /// class ended the search without output.
    pub fn explain(
        &self,
        lookback: &Lookback,
        key: SymbolicKey,
    ) -> (Option<RuleStep>, CompositionAction) {
        for step in self.order.steps() {
            if let Some(action) = self.try_step(*step, lookback, key) {
                tracing::trace!(
                    step = ?step,
                    key = ?key,
                    context = ?lookback.context,
                    action = ?action,
                    "composition rule"
                );
                return (action.is_handled().then_some(*step), action);
            }
        }

        tracing::trace!(key = ?key, context = ?lookback.context, "no rule");
        (None, CompositionAction::Unhandled)
    }

    /// `Some(action)` ends the search; `Some(Unhandled)` ends it without output.
    fn try_step(
        &self,
        step: RuleStep,
        lookback: &Lookback,
        key: SymbolicKey,
    ) -> Option<CompositionAction> {
        let letter = key.letter();
        let trigger = letter.is_some_and(|c| self.tables.is_vowel_trigger(c));
        let context = &lookback.context;

        match step {
            // Fixed keys ignore context and bypass the rule table
            RuleStep::Punctuation => match key {
                SymbolicKey::Punct(kind) => Some(
                    self.tables
                        .punctuation(kind)
                        .map_or(CompositionAction::Unhandled, |g| {
                            CompositionAction::Insert(g.clone())
                        }),
                ),
                _ => None,
            },

            RuleStep::ShiftForced => {
                if !(key.is_shifted() && trigger) {
                    return None;
                }
                self.swar(letter?)
            }

            RuleStep::VowelLock => match context {
                PrecedingContext::IndependentVowel(g) if trigger => {
                    Some(self.lock_or_fallback(g, letter?))
                }
                _ => None,
            },

            RuleStep::MatraCombine => match context {
                PrecedingContext::Matra(g) if trigger => Some(self.lock_or_fallback(g, letter?)),
                _ => None,
            },

            RuleStep::Transform => {
                let letter = letter?;
                if self.conjuncts {
                    if let Some(cluster) = &lookback.cluster {
                        if let Some(target) = self.rules.lookup_glyph(cluster, letter) {
                            return Some(CompositionAction::replace(2, target.clone()));
                        }
                    }
                }
                let g = context.glyph()?;
                self.rules
                    .lookup_glyph(g, letter)
                    .map(|target| CompositionAction::replace(1, target.clone()))
            }

            RuleStep::MatraAttach => {
                if !(trigger && context.is_consonant()) {
                    return None;
                }
                self.rules
                    .lookup(&ContextKey::AnyConsonant, letter?)
                    .map(|m| CompositionAction::Insert(m.clone()))
            }

            RuleStep::BaseEntry => {
                let letter = letter?;
                if let Some(g) = self.tables.consonant_for(letter) {
                    return Some(CompositionAction::Insert(g.clone()));
                }
                self.swar(letter)
            }
        }
    }

    /// Transform the preceding vowel or matra, else start a new independent
    /// vowel, else leave the key unhandled.
    fn lock_or_fallback(&self, preceding: &Glyph, letter: char) -> CompositionAction {
        if let Some(target) = self.rules.lookup_glyph(preceding, letter) {
            return CompositionAction::replace(1, target.clone());
        }
        self.swar(letter).unwrap_or(CompositionAction::Unhandled)
    }

    fn swar(&self, letter: char) -> Option<CompositionAction> {
        self.rules
            .lookup(&ContextKey::NoContext, letter)
            .map(|g| CompositionAction::Insert(g.clone()))
    }
}
