//! Engine factories for libsanskrit
//!
//! Builds the Devanagari tables for a configuration and wires them into the
//! generic core engine.

use std::sync::Arc;

use crate::config::{Profile, SanskritConfig};
use crate::tables;
use libdevanagari_core::{CompositionEngine, ImeEngine, TableError};

/// Build a composition engine for the given configuration.
pub fn create_engine(config: &SanskritConfig) -> Result<CompositionEngine, TableError> {
    let symbols = tables::symbol_tables(config.virama_key)?;
    let rules = tables::rule_table(config)?;
    Ok(CompositionEngine::from_arc(Arc::new(symbols), Arc::new(rules))
        .with_order(config.base.rule_order)
        .with_conjuncts(config.base.conjunct_ligatures))
}

/// Build an IME engine (engine + text buffer) for the given configuration.
pub fn create_ime_engine(config: &SanskritConfig) -> Result<ImeEngine, TableError> {
    let engine = create_engine(config)?;
    Ok(ImeEngine::new(engine, &config.base))
}

/// IME engine using the `uniform` profile.
pub fn create_ime_engine_uniform() -> Result<ImeEngine, TableError> {
    create_ime_engine(&SanskritConfig::for_profile(Profile::Uniform))
}

/// IME engine using the `swar_lock` profile.
pub fn create_ime_engine_swar_lock() -> Result<ImeEngine, TableError> {
    create_ime_engine(&SanskritConfig::for_profile(Profile::SwarLock))
}
