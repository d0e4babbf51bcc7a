//! # libsanskrit
//!
//! Devanagari/Sanskrit keyboard composition built on libdevanagari-core.
//!
//! ```rust
//! let mut ime = libsanskrit::create_ime_engine_uniform().unwrap();
//! ime.type_str("kfa");
//! assert_eq!(ime.text(), "खा");
//! ```

pub mod config;
pub mod engine;
pub mod tables;

// Re-export the core composition types
pub use libdevanagari_core::{
    CompositionAction, CompositionEngine, Config, Glyph, ImeEngine, KeyEvent, KeyResult,
    PrecedingContext, RuleFamily, RuleOrder, RuleStep, SymbolicKey, TableError,
};

pub use config::{Profile, RetroflexCycle, SanskritConfig};
pub use engine::{create_engine, create_ime_engine, create_ime_engine_swar_lock, create_ime_engine_uniform};
