//! Host glue: key events in, buffer edits out.
//!
//! The `ImeEngine` plays the part of the UI shell around the pure
//! `CompositionEngine`: it classifies each key event, resolves the context
//! from its own `InputBuffer`, composes, and applies the resulting action.
//! When the engine declines a key, the default text behavior (literal
//! insertion, backspace, cursor moves) is applied if `literal_fallback` is
//! enabled, as a toolkit text widget would.

use crate::engine::{CompositionAction, CompositionEngine, RuleStep};
use crate::input_buffer::InputBuffer;
use crate::key::{KeyClassifier, KeyEvent};
use crate::Config;
use std::sync::Arc;

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was consumed by the composition engine
    Handled,
    /// Key was not handled (pass through to default behavior)
    NotHandled,
}

/// Composition engine bound to a text buffer.
pub struct ImeEngine {
    engine: Arc<CompositionEngine>,
    classifier: KeyClassifier,
    buffer: InputBuffer,
    literal_fallback: bool,
    passthrough: bool,
    last_step: Option<RuleStep>,
}

impl ImeEngine {
    /// Create an IME engine with the given backend and configuration.
    pub fn new(engine: CompositionEngine, config: &Config) -> Self {
        Self::from_arc(Arc::new(engine), config)
    }

    /// Create an IME engine from an Arc-wrapped backend.
    pub fn from_arc(engine: Arc<CompositionEngine>, config: &Config) -> Self {
        Self {
            engine,
            classifier: KeyClassifier::new(config.punctuation_keys),
            buffer: InputBuffer::new(),
            literal_fallback: config.literal_fallback,
            passthrough: false,
            last_step: None,
        }
    }

    pub fn engine(&self) -> &CompositionEngine {
        &self.engine
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn is_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Rule class that handled the most recent key, if any.
    pub fn last_step(&self) -> Option<RuleStep> {
        self.last_step
    }

    /// Clear the buffer and leave passthrough mode.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.passthrough = false;
        self.last_step = None;
    }

    /// Process a key event and update the buffer.
    ///
    /// Returns `KeyResult::Handled` if the composition engine consumed the
    /// key, or `KeyResult::NotHandled` if it fell through to default handling.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        self.last_step = None;

        if key == KeyEvent::ShiftLock {
            self.passthrough = !self.passthrough;
            tracing::debug!(passthrough = self.passthrough, "passthrough toggled");
            return KeyResult::Handled;
        }

        if !self.passthrough {
            if let Some(symbolic) = self.classifier.classify(&key) {
                let lookback = self.engine.resolver().resolve(self.buffer.before_cursor());
                let (step, action) = self.engine.explain(&lookback, symbolic);
                if self.buffer.apply(&action, &lookback) {
                    self.last_step = step;
                    return KeyResult::Handled;
                }
            }
        }

        self.default_behavior(&key);
        KeyResult::NotHandled
    }

    /// Feed a string as key events; uppercase letters are shifted.
    pub fn type_str(&mut self, input: &str) {
        for ch in input.chars() {
            let key = match ch {
                ' ' => KeyEvent::Space,
                '\n' => KeyEvent::Enter,
                '\u{8}' => KeyEvent::Backspace,
                _ => KeyEvent::char(ch),
            };
            self.process_key(key);
        }
    }

    /// Compose one key against the current buffer without applying it.
    pub fn preview(&self, key: &KeyEvent) -> CompositionAction {
        match self.classifier.classify(key) {
            Some(symbolic) => self.engine.process(self.buffer.before_cursor(), symbolic),
            None => CompositionAction::Unhandled,
        }
    }

    fn default_behavior(&mut self, key: &KeyEvent) {
        if !self.literal_fallback {
            return;
        }
        match key {
            KeyEvent::Backspace => {
                self.buffer.delete_before();
            }
            KeyEvent::Delete => {
                self.buffer.delete_after();
            }
            KeyEvent::Left => {
                self.buffer.move_left();
            }
            KeyEvent::Right => {
                self.buffer.move_right();
            }
            other => {
                if let Some(ch) = other.literal() {
                    self.buffer.insert_char(ch);
                }
            }
        }
    }
}
