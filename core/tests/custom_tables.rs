//! The core engine is script-agnostic: these tests drive it with a tiny
//! hand-built inventory instead of a language crate's tables.

use libdevanagari_core::{
    CompositionAction, CompositionEngine, Config, Glyph, ImeEngine, InputBuffer, RuleFamily,
    RuleOrder, RuleTable, SymbolTables, SymbolicKey,
};

fn tiny_engine(order: RuleOrder) -> CompositionEngine {
    let tables = SymbolTables::builder()
        .consonant('k', "क")
        .derived_consonants(&["ख", "क्ष"])
        .independent_vowels(&["अ", "आ"])
        .matras(&["ा"])
        .modifiers(&["्"])
        .vowel_triggers("aq")
        .build()
        .unwrap();

    let mut rules = RuleTable::new();
    rules.extend_family(RuleFamily::Cycle, &[("क", 'f', "ख"), ("ख", 'f', "क")]);
    rules.extend_family(RuleFamily::Swar, &[("", 'a', "अ")]);
    rules.extend_family(RuleFamily::Vriddhi, &[("अ", 'a', "आ")]);
    rules.extend_family(RuleFamily::Matra, &[("*", 'a', "ा"), ("*", 'q', "्")]);
    rules.extend_family(RuleFamily::Conjunct, &[("क्", 'k', "क्ष")]);

    CompositionEngine::new(tables, rules).with_order(order)
}

#[test]
fn buffer_applies_each_action_kind() {
    let engine = tiny_engine(RuleOrder::ShiftFirst);
    let mut buffer = InputBuffer::new();

    for key in ['k', 'f', 'a'] {
        let lookback = engine.resolver().resolve(buffer.before_cursor());
        let action = engine.compose_lookback(&lookback, SymbolicKey::Letter(key));
        assert!(buffer.apply(&action, &lookback));
    }
    assert_eq!(buffer.text(), "खा");

    let lookback = engine.resolver().resolve(buffer.before_cursor());
    let action = engine.compose_lookback(&lookback, SymbolicKey::Letter('z'));
    assert_eq!(action, CompositionAction::Unhandled);
    assert!(!buffer.apply(&action, &lookback));
    assert_eq!(buffer.text(), "खा");
}

#[test]
fn conjunct_rules_are_ignored_until_enabled() {
    let off = tiny_engine(RuleOrder::ShiftFirst);
    assert_eq!(
        off.process("क्", SymbolicKey::Letter('k')),
        CompositionAction::Insert(Glyph::from("क"))
    );

    let on = tiny_engine(RuleOrder::ShiftFirst).with_conjuncts(true);
    assert_eq!(
        on.process("क्", SymbolicKey::Letter('k')),
        CompositionAction::ReplaceTail(2, Glyph::from("क्ष"))
    );
}

#[test]
fn ime_engine_with_both_orders() {
    let config = Config::default();

    let mut shift_first = ImeEngine::new(tiny_engine(RuleOrder::ShiftFirst), &config);
    shift_first.type_str("aA");
    assert_eq!(shift_first.text(), "अअ");

    let mut lock_first = ImeEngine::new(tiny_engine(RuleOrder::LockFirst), &config);
    lock_first.type_str("aA");
    assert_eq!(lock_first.text(), "आ");
}

#[test]
fn literal_fallback_can_be_disabled() {
    let config = Config {
        literal_fallback: false,
        ..Config::default()
    };
    let mut ime = ImeEngine::new(tiny_engine(RuleOrder::ShiftFirst), &config);
    ime.type_str("kx7");
    assert_eq!(ime.text(), "क");
}
