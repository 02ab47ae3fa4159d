//! # Key Bindings
//!
//! Parses binding strings such as `"ctrl+n"`, `"alt+x"`, `"f2"` or `"n"` into
//! a `KeyBinding` that can be matched against incoming key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether `event` is a press of this binding.
    ///
    /// Shift is ignored for character keys since terminals disagree on
    /// whether `N` arrives with the shift modifier set.
    pub fn matches(&self, event: &TuiEvent) -> bool {
        let TuiEvent::Key(KeyEvent { code, modifiers, .. }) = event else {
            return false;
        };
        if *code != self.code {
            return false;
        }
        match code {
            KeyCode::Char(_) => {
                modifiers.difference(KeyModifiers::SHIFT)
                    == self.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => *modifiers == self.modifiers,
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::BackTab => write!(f, "backtab"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Delete => write!(f, "delete"),
            KeyCode::Insert => write!(f, "insert"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::PageUp => write!(f, "pageup"),
            KeyCode::PageDown => write!(f, "pagedown"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBindingError {
    Empty,
    UnknownKey(String),
    UnknownModifier(String),
}

impl fmt::Display for KeyBindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyBindingError::Empty => write!(f, "key binding is empty"),
            KeyBindingError::UnknownKey(k) => write!(f, "unknown key in binding: {k:?}"),
            KeyBindingError::UnknownModifier(m) => {
                write!(f, "unknown modifier in binding: {m:?}")
            }
        }
    }
}

impl std::error::Error for KeyBindingError {}

impl FromStr for KeyBinding {
    type Err = KeyBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyBindingError::Empty);
        }

        // "+" and "ctrl++" bind the plus key itself
        let (prefix, key) = if s == "+" {
            ("", "+")
        } else {
            match s.strip_suffix("++") {
                Some(rest) => (rest, "+"),
                None => match s.rsplit_once('+') {
                    Some((prefix, key)) => (prefix, key),
                    None => ("", s),
                },
            }
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" | "meta" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyBindingError::UnknownModifier(part.to_string())),
            };
        }

        Ok(Self::new(parse_key_code(key)?, modifiers))
    }
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeyBindingError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = key.to_ascii_lowercase();
    let code = match lower.as_str() {
        "" => return Err(KeyBindingError::Empty),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "space" => KeyCode::Char(' '),
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=24).contains(&n) => KeyCode::F(n),
            _ => return Err(KeyBindingError::UnknownKey(key.to_string())),
        },
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ctrl_binding() {
        let binding: KeyBinding = "ctrl+n".parse().unwrap();
        assert_eq!(binding, KeyBinding::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert!(binding.matches(&TuiEvent::ctrl('n')));
        assert!(!binding.matches(&TuiEvent::char('n')));
    }

    #[test]
    fn test_parse_plain_char_and_named_keys() {
        assert_eq!(
            "n".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Char('n'), KeyModifiers::NONE)
        );
        assert_eq!("F2".parse::<KeyBinding>().unwrap().code, KeyCode::F(2));
        assert_eq!("Alt+Enter".parse::<KeyBinding>().unwrap().modifiers, KeyModifiers::ALT);
        assert_eq!("ctrl++".parse::<KeyBinding>().unwrap().code, KeyCode::Char('+'));
        assert_eq!(
            "+".parse::<KeyBinding>().unwrap(),
            KeyBinding::new(KeyCode::Char('+'), KeyModifiers::NONE)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyBinding>(), Err(KeyBindingError::Empty));
        assert_eq!("ctrl+".parse::<KeyBinding>(), Err(KeyBindingError::Empty));
        assert_eq!(
            "hyper+n".parse::<KeyBinding>(),
            Err(KeyBindingError::UnknownModifier("hyper".to_string()))
        );
        assert_eq!(
            "ctrl+banana".parse::<KeyBinding>(),
            Err(KeyBindingError::UnknownKey("banana".to_string()))
        );
        assert!("f99".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let binding: KeyBinding = "N".parse().unwrap();
        let shifted = TuiEvent::Key(KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT));
        assert!(binding.matches(&shifted));
    }

    #[test]
    fn test_display_round_trips_label() {
        let binding: KeyBinding = "ctrl+n".parse().unwrap();
        assert_eq!(binding.to_string(), "ctrl+n");
        assert_eq!("f5".parse::<KeyBinding>().unwrap().to_string(), "f5");
    }
}
