//! Raw key events and their symbolic classification.
//!
//! The host delivers `KeyEvent`s; the `KeyClassifier` reduces them to the
//! small `SymbolicKey` alphabet the composition engine understands.

use serde::{Deserialize, Serialize};

/// Fixed punctuation/modifier keys, handled independently of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctKind {
    Visarga,
    Anusvara,
    Danda,
}

/// A key event reduced to what the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolicKey {
    /// Lowercase letter typed without shift.
    Letter(char),
    /// Letter typed with shift held, stored lowercase.
    ShiftedLetter(char),
    Punct(PunctKind),
}

impl SymbolicKey {
    /// The lowercase letter payload, if this is a letter key.
    pub fn letter(&self) -> Option<char> {
        match self {
            SymbolicKey::Letter(c) | SymbolicKey::ShiftedLetter(c) => Some(*c),
            SymbolicKey::Punct(_) => None,
        }
    }

    pub fn is_shifted(&self) -> bool {
        matches!(self, SymbolicKey::ShiftedLetter(_))
    }
}

/// Key events delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable character with the shift state at press time
    Char { ch: char, shift: bool },
    /// Space bar
    Space,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Left arrow key
    Left,
    /// Right arrow key
    Right,
    /// Enter/Return key
    Enter,
    /// Shift lock toggle (for passthrough mode)
    ShiftLock,
    /// Any other named key (e.g. "F5", "Tab")
    Named(String),
}

impl KeyEvent {
    /// Character event; uppercase letters are treated as shifted.
    pub fn char(ch: char) -> Self {
        KeyEvent::Char {
            ch,
            shift: ch.is_uppercase(),
        }
    }

    /// Character event with shift held.
    pub fn shifted(ch: char) -> Self {
        KeyEvent::Char { ch, shift: true }
    }

    /// Map a host key name (GDK-style) to an event.
    pub fn from_name(name: &str, shift: bool) -> Self {
        match name {
            "space" => KeyEvent::Space,
            "BackSpace" => KeyEvent::Backspace,
            "Delete" => KeyEvent::Delete,
            "Left" => KeyEvent::Left,
            "Right" => KeyEvent::Right,
            "Return" | "KP_Enter" => KeyEvent::Enter,
            "Shift_Lock" | "Caps_Lock" => KeyEvent::ShiftLock,
            "semicolon" => KeyEvent::Char { ch: ';', shift },
            "comma" => KeyEvent::Char { ch: ',', shift },
            "period" => KeyEvent::Char { ch: '.', shift },
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyEvent::Char { ch, shift },
                    _ => KeyEvent::Named(name.to_string()),
                }
            }
        }
    }

    /// The character a default text handler would insert for this key.
    pub fn literal(&self) -> Option<char> {
        match self {
            KeyEvent::Char { ch, .. } => Some(*ch),
            KeyEvent::Space => Some(' '),
            KeyEvent::Enter => Some('\n'),
            _ => None,
        }
    }
}

/// Characters bound to the fixed punctuation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunctuationKeys {
    pub visarga: char,
    pub danda: char,
    pub anusvara: char,
}

impl Default for PunctuationKeys {
    fn default() -> Self {
        Self {
            visarga: ';',
            danda: ',',
            anusvara: '.',
        }
    }
}

/// Maps raw key events to symbolic keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyClassifier {
    punct: PunctuationKeys,
}

impl KeyClassifier {
    pub fn new(punct: PunctuationKeys) -> Self {
        Self { punct }
    }

    /// Classify a key event. `None` means the engine has nothing to say about
    /// it and the host should apply its default behavior.
    pub fn classify(&self, event: &KeyEvent) -> Option<SymbolicKey> {
        let (ch, shift) = match event {
            KeyEvent::Char { ch, shift } => (*ch, *shift),
            _ => return None,
        };

        // Punctuation bindings win over letters
        if ch == self.punct.visarga {
            return Some(SymbolicKey::Punct(PunctKind::Visarga));
        }
        if ch == self.punct.danda {
            return Some(SymbolicKey::Punct(PunctKind::Danda));
        }
        if ch == self.punct.anusvara {
            return Some(SymbolicKey::Punct(PunctKind::Anusvara));
        }

        if !ch.is_alphabetic() {
            return None;
        }
        let mut lower = ch.to_lowercase();
        let letter = match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            // Multi-char lowercase mappings have no rule entries
            _ => return None,
        };
        if shift || ch.is_uppercase() {
            Some(SymbolicKey::ShiftedLetter(letter))
        } else {
            Some(SymbolicKey::Letter(letter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_shift() {
        let c = KeyClassifier::default();
        assert_eq!(c.classify(&KeyEvent::char('k')), Some(SymbolicKey::Letter('k')));
        assert_eq!(
            c.classify(&KeyEvent::char('A')),
            Some(SymbolicKey::ShiftedLetter('a'))
        );
        assert_eq!(
            c.classify(&KeyEvent::shifted('i')),
            Some(SymbolicKey::ShiftedLetter('i'))
        );
    }

    #[test]
    fn punctuation_bindings() {
        let c = KeyClassifier::default();
        assert_eq!(
            c.classify(&KeyEvent::char(';')),
            Some(SymbolicKey::Punct(PunctKind::Visarga))
        );
        assert_eq!(
            c.classify(&KeyEvent::char(',')),
            Some(SymbolicKey::Punct(PunctKind::Danda))
        );
        assert_eq!(
            c.classify(&KeyEvent::char('.')),
            Some(SymbolicKey::Punct(PunctKind::Anusvara))
        );

        let custom = KeyClassifier::new(PunctuationKeys {
            visarga: ':',
            danda: '|',
            anusvara: 'M',
        });
        assert_eq!(
            custom.classify(&KeyEvent::char('M')),
            Some(SymbolicKey::Punct(PunctKind::Anusvara))
        );
        assert_eq!(custom.classify(&KeyEvent::char(';')), None);
    }

    #[test]
    fn non_letters_are_unclassified() {
        let c = KeyClassifier::default();
        assert_eq!(c.classify(&KeyEvent::char('7')), None);
        assert_eq!(c.classify(&KeyEvent::Space), None);
        assert_eq!(c.classify(&KeyEvent::Backspace), None);
        assert_eq!(c.classify(&KeyEvent::Named("F5".into())), None);
    }

    #[test]
    fn host_key_names() {
        assert_eq!(KeyEvent::from_name("semicolon", false), KeyEvent::char(';'));
        assert_eq!(KeyEvent::from_name("a", true), KeyEvent::shifted('a'));
        assert_eq!(KeyEvent::from_name("BackSpace", false), KeyEvent::Backspace);
        assert_eq!(
            KeyEvent::from_name("Tab", false),
            KeyEvent::Named("Tab".to_string())
        );
        assert_eq!(KeyEvent::Space.literal(), Some(' '));
        assert_eq!(KeyEvent::Left.literal(), None);
    }
}
