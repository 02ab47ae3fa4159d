//! Single-line text field used by the record form.
//!
//! `TextField` owns its value and a cursor byte offset. Editing keys follow
//! readline conventions where they overlap with the input box keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

pub(super) struct TextField {
    pub key: &'static str,
    pub title: &'static str,
    pub value: String,
    /// Cursor position as byte offset in value (0..=value.len())
    pub cursor: usize,
}

impl TextField {
    pub fn new(key: &'static str, title: &'static str) -> Self {
        Self {
            key,
            title,
            value: String::new(),
            cursor: 0,
        }
    }

    /// Replace the value and park the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert text at the cursor. Newlines are dropped since the field is single-line.
    pub fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.value.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Display width of the text before the cursor, saturating at `u16::MAX`.
    pub fn cursor_column(&self) -> u16 {
        u16::try_from(self.value[..self.cursor].width()).unwrap_or(u16::MAX)
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.value.len();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Char('k') if ctrl => {
                self.value.truncate(self.cursor);
                true
            }
            // Other control chords are not text
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => false,
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.value, self.cursor);
                self.value.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.value.len() {
                    return false;
                }
                let next = next_char_boundary(&self.value, self.cursor);
                self.value.drain(self.cursor..next);
                true
            }
            KeyCode::Left => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor = prev_char_boundary(&self.value, self.cursor);
                true
            }
            KeyCode::Right => {
                if self.cursor >= self.value.len() {
                    return false;
                }
                self.cursor = next_char_boundary(&self.value, self.cursor);
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(field: &mut TextField, code: KeyCode) -> bool {
        field.handle_key(&KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new("name", "Name");
        for c in "Kiwi".chars() {
            assert!(press(&mut field, KeyCode::Char(c)));
        }
        assert_eq!(field.value, "Kiwi");
        assert!(press(&mut field, KeyCode::Backspace));
        assert_eq!(field.value, "Kiw");
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_cursor_movement_respects_multibyte_chars() {
        let mut field = TextField::new("name", "Name");
        field.set_value("Açaí");
        assert!(press(&mut field, KeyCode::Left));
        assert_eq!(&field.value[field.cursor..], "í");
        assert!(press(&mut field, KeyCode::Backspace));
        assert_eq!(field.value, "Açí");
        assert!(press(&mut field, KeyCode::Home));
        assert!(!press(&mut field, KeyCode::Left));
        assert!(press(&mut field, KeyCode::Delete));
        assert_eq!(field.value, "çí");
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut field = TextField::new("color", "Color");
        field.insert_str("Dark\nRed");
        assert_eq!(field.value, "DarkRed");
        assert_eq!(field.cursor, field.value.len());
    }

    #[test]
    fn test_control_chords_are_not_inserted() {
        let mut field = TextField::new("name", "Name");
        field.set_value("Fig");
        let consumed = field.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert!(!consumed);
        assert_eq!(field.value, "Fig");

        field.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(field.value.is_empty());
    }

    #[test]
    fn test_cursor_column_saturates_on_long_values() {
        let mut field = TextField::new("name", "Name");
        field.insert_str(&"x".repeat(70_000));
        assert_eq!(field.cursor_column(), u16::MAX);
    }

    #[test]
    fn test_cursor_column_uses_display_width() {
        let mut field = TextField::new("name", "Name");
        field.set_value("梨x");
        assert_eq!(field.cursor_column(), 3);
    }
}
